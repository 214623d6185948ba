use crate::db::submissions::{get_submission, insert_submission, list_recent, record_prediction, set_status};
use crate::db::{market_insights, Database};
use crate::domain::{attach_metadata, BatchSummary, SubmissionForm, VerificationStatus, PREDICTION_CONFIDENCE};
use crate::errors::{EstimateError, ServerError};
use crate::features::rows::missing_columns;
use crate::features::{derive, derive_many, ModelFeatureRecord, PropertyDescription, PropertyForm};
use crate::inference::InferenceEngine;
use crate::responses::{html_response, json_error_response, json_response, redirect, ResultResp};
use crate::spreadsheets::export_predictions_xlsx;
use crate::templates::pages::{admin_page, home_page, AdminVm, HomeVm};
use crate::uploads::read_rows;
use astra::Request;
use chrono::Utc;
use log::{info, warn};
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;

/// Uploads above this size are refused.
pub const MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;
const ADMIN_PAGE_SIZE: i64 = 100;
const HOME_PAGE_IMPORTANCES: usize = 8;

/// Shared by every worker thread.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub engine: InferenceEngine,
    pub chunk_size: usize,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(state),
        ("POST", "/model-prediction") => api(model_prediction(req, state)),
        ("POST", "/api/submissions") => api(create_submission(req, state)),
        ("GET", "/api/market-insights") => api(insights(state)),
        ("GET", "/admin") => admin(state),
        ("POST", p) if p.starts_with("/admin/submissions/") => admin_action(p, state),
        _ => Err(ServerError::NotFound),
    }
}

/// JSON endpoints answer errors in JSON rather than with the HTML page.
fn api(result: ResultResp) -> ResultResp {
    Ok(result.unwrap_or_else(json_error_response))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;
    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest(format!(
            "Request body exceeds {MAX_BODY_BYTES} bytes"
        )));
    }
    Ok(buf)
}

fn predict_one(engine: &InferenceEngine, record: ModelFeatureRecord) -> Result<f64, ServerError> {
    engine
        .predict(std::slice::from_ref(&record))?
        .into_iter()
        .next()
        .ok_or(ServerError::InternalError)
}

fn predict_description(engine: &InferenceEngine, form: &PropertyForm) -> Result<f64, ServerError> {
    let description = PropertyDescription::try_from(form)?;
    let record = derive(&description)?;
    predict_one(engine, record)
}

fn home(state: &AppState) -> ResultResp {
    let mut importances = state.engine.feature_importances().unwrap_or_default();
    importances.sort_by(|a, b| b.1.total_cmp(&a.1));
    importances.truncate(HOME_PAGE_IMPORTANCES);

    html_response(home_page(&HomeVm {
        model_name: state.engine.model_name().to_string(),
        model_version: state.engine.model_version().to_string(),
        importances,
    }))
}

fn model_prediction(req: Request, state: &AppState) -> ResultResp {
    let want_xlsx = parse_query(&req).get("format").map(String::as_str) == Some("xlsx");
    let body = read_body(req)?;

    if body.iter().all(u8::is_ascii_whitespace) {
        info!("No upload, returning test prediction");
        let price = predict_one(&state.engine, ModelFeatureRecord::reference())?;
        return json_response(
            200,
            &json!({ "success": true, "prediction": price, "test_mode": true }),
        );
    }

    let rows = read_rows(&body)?;
    if rows.is_empty() {
        return Err(ServerError::BadRequest("CSV upload has no data rows".into()));
    }
    info!("CSV upload: {} rows, {} bytes", rows.len(), body.len());

    let records = derive_many(&rows).map_err(|err| {
        if let EstimateError::InvalidInput(_) = err {
            let missing = missing_columns(&rows[0]);
            if !missing.is_empty() {
                warn!("Upload is missing columns: {}", missing.join(", "));
            }
        }
        err
    })?;

    let prices = state.engine.predict_chunked(&records, state.chunk_size)?;
    let predictions = attach_metadata(&rows, &records, &prices);

    if let Some(s) = BatchSummary::from_prices(&prices) {
        info!(
            "Predicted {} rows with {}: min {:.2}, max {:.2}, mean {:.2}",
            s.count,
            state.engine.model_name(),
            s.min,
            s.max,
            s.mean
        );
    }

    if want_xlsx {
        return export_predictions_xlsx(&predictions);
    }
    json_response(
        200,
        &json!({
            "success": true,
            "count": predictions.len(),
            "predictions": predictions,
        }),
    )
}

fn create_submission(req: Request, state: &AppState) -> ResultResp {
    let body = read_body(req)?;
    let form: SubmissionForm = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))?;

    let price = predict_description(&state.engine, &form.property)?;
    let now = Utc::now().naive_utc();

    let id = state.db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        let id = insert_submission(&tx, &form, now)?;
        record_prediction(&tx, id, price, PREDICTION_CONFIDENCE, now)?;
        tx.commit()
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(id)
    })?;

    info!("Submission {id} priced at {price:.2}");
    json_response(
        201,
        &json!({
            "success": true,
            "id": id,
            "predicted_price": price,
            "confidence": PREDICTION_CONFIDENCE,
        }),
    )
}

fn insights(state: &AppState) -> ResultResp {
    let insights = state.db.with_conn(|conn| market_insights(conn))?;
    json_response(200, &json!({ "success": true, "insights": insights }))
}

fn admin(state: &AppState) -> ResultResp {
    let vm = state.db.with_conn(|conn| {
        Ok(AdminVm {
            submissions: list_recent(conn, ADMIN_PAGE_SIZE)?,
            insights: market_insights(conn)?,
        })
    })?;
    html_response(admin_page(&vm))
}

/// `/admin/submissions/{id}/{verify|pending|reject|regenerate}`
fn admin_action(path: &str, state: &AppState) -> ResultResp {
    let rest = path
        .strip_prefix("/admin/submissions/")
        .ok_or(ServerError::NotFound)?;
    let (id, action) = rest.split_once('/').ok_or(ServerError::NotFound)?;
    let id: i64 = id.parse().map_err(|_| ServerError::NotFound)?;

    if action == "regenerate" {
        let submission = state.db.with_conn(|conn| get_submission(conn, id))?;
        let price = predict_description(&state.engine, &submission.form.property)?;
        let now = Utc::now().naive_utc();
        state
            .db
            .with_conn(|conn| record_prediction(conn, id, price, PREDICTION_CONFIDENCE, now))?;
        info!("Submission {id} re-priced at {price:.2}");
        return redirect("/admin");
    }

    let status = VerificationStatus::from_action(action).ok_or(ServerError::NotFound)?;
    state.db.with_conn(|conn| set_status(conn, id, status))?;
    info!("Submission {id} marked {}", status.as_str());
    redirect("/admin")
}
