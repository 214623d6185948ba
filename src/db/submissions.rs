// src/db/submissions.rs
use crate::domain::{Submission, SubmissionForm, VerificationStatus};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_SUBMISSION: &str = r#"
    SELECT id, submitted_at, status, form_json, contact_name, contact_email,
           contact_phone, sale_price, predicted_price, prediction_confidence, predicted_at
    FROM submissions
"#;

fn db_err(e: rusqlite::Error) -> ServerError {
    ServerError::DbError(e.to_string())
}

/// Store a new submission in `pending` state. Returns its id.
pub fn insert_submission(
    conn: &Connection,
    form: &SubmissionForm,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    let p = &form.property;
    let form_json = serde_json::to_string(p)
        .map_err(|e| ServerError::DbError(format!("Failed to encode form: {e}")))?;

    conn.execute(
        r#"
        INSERT INTO submissions (
            submitted_at, status, property_type, address, city, neighborhood,
            bedrooms, bathrooms, living_area, year_built, form_json,
            contact_name, contact_email, contact_phone, sale_price
        ) VALUES (?1, 'pending', ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        "#,
        params![
            now,
            p.property_type,
            p.address,
            p.city,
            p.neighborhood,
            p.bedrooms.unwrap_or(0),
            p.bathrooms.unwrap_or(0.0),
            p.living_area.unwrap_or(0),
            p.year_built.unwrap_or(0),
            form_json,
            form.contact_name,
            form.contact_email,
            form.contact_phone,
            form.sale_price,
        ],
    )
    .map_err(db_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn record_prediction(
    conn: &Connection,
    id: i64,
    price: f64,
    confidence: f64,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    let changed = conn
        .execute(
            "UPDATE submissions SET predicted_price = ?, prediction_confidence = ?, predicted_at = ? WHERE id = ?",
            params![price, confidence, now, id],
        )
        .map_err(db_err)?;
    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn set_status(
    conn: &Connection,
    id: i64,
    status: VerificationStatus,
) -> Result<(), ServerError> {
    let changed = conn
        .execute(
            "UPDATE submissions SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )
        .map_err(db_err)?;
    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

fn submission_from_row(row: &Row<'_>) -> rusqlite::Result<(Submission, String)> {
    let status: String = row.get(2)?;
    let form_json: String = row.get(3)?;
    let submission = Submission {
        id: row.get(0)?,
        submitted_at: row.get(1)?,
        status: VerificationStatus::parse(&status).unwrap_or(VerificationStatus::Pending),
        form: SubmissionForm {
            contact_name: row.get(4)?,
            contact_email: row.get(5)?,
            contact_phone: row.get(6)?,
            sale_price: row.get(7)?,
            ..SubmissionForm::default()
        },
        predicted_price: row.get(8)?,
        prediction_confidence: row.get(9)?,
        predicted_at: row.get(10)?,
    };
    Ok((submission, form_json))
}

fn decode_form(mut submission: Submission, form_json: &str) -> Result<Submission, ServerError> {
    submission.form.property = serde_json::from_str(form_json).map_err(|e| {
        ServerError::DbError(format!("Submission {} has a corrupt form: {e}", submission.id))
    })?;
    Ok(submission)
}

pub fn get_submission(conn: &Connection, id: i64) -> Result<Submission, ServerError> {
    let found = conn
        .query_row(
            &format!("{SELECT_SUBMISSION} WHERE id = ?"),
            params![id],
            submission_from_row,
        )
        .optional()
        .map_err(db_err)?;

    match found {
        Some((submission, form_json)) => decode_form(submission, &form_json),
        None => Err(ServerError::NotFound),
    }
}

/// Most recent submissions first.
pub fn list_recent(conn: &Connection, limit: i64) -> Result<Vec<Submission>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_SUBMISSION} ORDER BY submitted_at DESC, id DESC LIMIT ?"
        ))
        .map_err(db_err)?;

    let rows = stmt
        .query_map(params![limit], submission_from_row)
        .map_err(db_err)?;

    let mut out = Vec::new();
    for r in rows {
        let (submission, form_json) = r.map_err(db_err)?;
        out.push(decode_form(submission, &form_json)?);
    }
    Ok(out)
}
