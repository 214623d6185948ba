use crate::features::ModelFeatureRecord;
use crate::router::handle;
use crate::tests::utils::{body_json, body_string, records_csv, skewed_state, test_state};
use astra::Body;
use http::{Method, Request};

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(body.into())
        .unwrap()
}

fn larger_house() -> ModelFeatureRecord {
    let mut record = ModelFeatureRecord::reference();
    record.gr_liv_area = 2400;
    record.first_flr_sf = 1200;
    record.second_flr_sf = 1200;
    record.overall_qual = 8;
    record
}

#[test]
fn empty_body_returns_test_prediction() {
    let state = test_state("test_mode");
    let resp = handle(post("/model-prediction", Body::empty()), &state).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let json = body_json(resp);
    assert_eq!(json["success"], true);
    assert_eq!(json["test_mode"], true);
    assert!(json["prediction"].as_f64().unwrap() > 0.0);
}

#[test]
fn csv_upload_returns_one_prediction_per_row_in_order() {
    let state = test_state("csv_upload");
    let csv = records_csv(&[
        (1461, ModelFeatureRecord::reference()),
        (1462, larger_house()),
        (1463, ModelFeatureRecord::reference()),
    ]);

    let resp = handle(post("/model-prediction", csv), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 3);

    let predictions = json["predictions"].as_array().unwrap();
    let ids: Vec<i64> = predictions.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1461, 1462, 1463]);
    assert_eq!(predictions[1]["sqft_living"], 2400);
    assert_eq!(predictions[0]["neighborhood"], "NAmes");

    let price = |i: usize| predictions[i]["predicted_price"].as_f64().unwrap();
    assert!(price(1) > price(0));
    assert_eq!(price(0), price(2));
}

#[test]
fn csv_upload_as_xlsx() {
    let state = test_state("csv_xlsx");
    let csv = records_csv(&[(1, ModelFeatureRecord::reference())]);

    let resp = handle(post("/model-prediction?format=xlsx", csv), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("price_predictions.xlsx"));
}

#[test]
fn missing_column_is_a_json_400() {
    let state = test_state("csv_missing");
    let resp = handle(post("/model-prediction", "Id,GrLivArea\n1,896\n"), &state).expect("Handler failed");

    assert_eq!(resp.status(), 400);
    let json = body_json(resp);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_type"], "InvalidInput");
    assert!(json["error"].as_str().unwrap().contains("row 1"));
}

#[test]
fn header_without_rows_is_bad_request() {
    let state = test_state("csv_header_only");
    let resp = handle(post("/model-prediction", "Id,GrLivArea\n"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error_type"], "BadRequest");
}

#[test]
fn model_schema_skew_is_a_json_500() {
    let state = skewed_state("csv_skew");
    let resp = handle(post("/model-prediction", Body::empty()), &state).expect("Handler failed");

    assert_eq!(resp.status(), 500);
    let json = body_json(resp);
    assert_eq!(json["error_type"], "SchemaMismatch");
}

#[test]
fn home_page_names_the_model() {
    let state = test_state("home");
    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("ames-linear"));
    assert!(body.contains("OverallQual"));
}

#[test]
fn unknown_route_is_not_found() {
    let state = test_state("not_found");
    let req = Request::builder()
        .method(Method::GET)
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    assert!(matches!(handle(req, &state), Err(crate::errors::ServerError::NotFound)));
}
