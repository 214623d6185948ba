use crate::db::submissions::get_submission;
use crate::domain::VerificationStatus;
use crate::router::handle;
use crate::tests::utils::{body_json, test_state};
use astra::Body;
use http::{Method, Request};
use serde_json::json;

fn submit(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/submissions")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_submission() -> serde_json::Value {
    json!({
        "property_type": "single_family",
        "address": "12 Elm St",
        "city": "Ames",
        "state": "IA",
        "zip_code": "50010",
        "neighborhood": "CollgCr",
        "bedrooms": 3,
        "bathrooms": 2.5,
        "living_area": 1800,
        "lot_area": 9000,
        "year_built": 1999,
        "overall_quality": 7,
        "overall_condition": 5,
        "garage_cars": 2,
        "garage_area": 480,
        "basement_area": 1000,
        "basement_quality": "good",
        "exterior_quality": "good",
        "kitchen_quality": "excellent",
        "has_fireplace": true,
        "fireplace_quality": "average",
        "contact_email": "owner@example.com",
        "sale_price": 215000
    })
}

#[test]
fn submission_is_priced_and_stored() {
    let state = test_state("submission_ok");
    let resp = handle(submit(valid_submission()), &state).expect("Handler failed");

    assert_eq!(resp.status(), 201);
    let json = body_json(resp);
    assert_eq!(json["success"], true);
    assert_eq!(json["confidence"], 90.0);
    let price = json["predicted_price"].as_f64().unwrap();
    assert!(price > 0.0);

    let id = json["id"].as_i64().unwrap();
    let stored = state.db.with_conn(|conn| get_submission(conn, id)).unwrap();
    assert_eq!(stored.status, VerificationStatus::Pending);
    assert_eq!(stored.predicted_price, Some(price));
    assert_eq!(stored.form.sale_price, Some(215000.0));
    assert_eq!(stored.form.property.address.as_deref(), Some("12 Elm St"));
}

#[test]
fn missing_required_field_is_invalid_input() {
    let state = test_state("submission_missing");
    let mut body = valid_submission();
    body.as_object_mut().unwrap().remove("living_area");

    let resp = handle(submit(body), &state).expect("Handler failed");
    assert_eq!(resp.status(), 400);
    let json = body_json(resp);
    assert_eq!(json["error_type"], "InvalidInput");
    assert!(json["error"].as_str().unwrap().contains("living_area"));
}

#[test]
fn out_of_range_rating_is_invalid_input() {
    let state = test_state("submission_rating");
    let mut body = valid_submission();
    body["overall_quality"] = json!(11);

    let resp = handle(submit(body), &state).expect("Handler failed");
    assert_eq!(resp.status(), 400);
}

#[test]
fn unrecognized_categories_still_price() {
    let state = test_state("submission_unknown_codes");
    let mut body = valid_submission();
    body["property_type"] = json!("castle");
    body["kitchen_quality"] = json!("superb");
    body["neighborhood"] = json!("Atlantis");

    let resp = handle(submit(body), &state).expect("Handler failed");
    assert_eq!(resp.status(), 201);
}

#[test]
fn malformed_json_is_bad_request() {
    let state = test_state("submission_bad_json");
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/submissions")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error_type"], "BadRequest");
}

#[test]
fn market_insights_summarize_submissions() {
    let state = test_state("insights");
    for _ in 0..2 {
        handle(submit(valid_submission()), &state).expect("Handler failed");
    }

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/market-insights")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    let insights = &json["insights"];
    assert_eq!(insights["total_submissions"], 2);
    assert_eq!(insights["pending"], 2);
    assert_eq!(insights["priced"], 2);
    assert_eq!(insights["compared_sales"], 2);
    assert!(insights["mean_absolute_error"].as_f64().is_some());
}
