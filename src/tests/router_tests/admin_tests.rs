use crate::db::submissions::{get_submission, insert_submission};
use crate::domain::{SubmissionForm, VerificationStatus};
use crate::features::PropertyForm;
use crate::router::{handle, AppState};
use crate::tests::utils::{body_string, test_state};
use astra::Body;
use chrono::Utc;
use http::{Method, Request};

fn stored_submission(state: &AppState) -> i64 {
    let form = SubmissionForm {
        property: PropertyForm {
            address: Some("3 Oak Ave".into()),
            city: Some("Ames".into()),
            neighborhood: Some("NoRidge".into()),
            bedrooms: Some(4),
            bathrooms: Some(3.0),
            living_area: Some(2600),
            lot_area: Some(12000),
            year_built: Some(2005),
            overall_quality: Some(8),
            overall_condition: Some(5),
            ..PropertyForm::default()
        },
        contact_name: Some("Pat".into()),
        ..SubmissionForm::default()
    };
    let now = Utc::now().naive_utc();
    state
        .db
        .with_conn(|conn| insert_submission(conn, &form, now))
        .expect("Failed to insert submission")
}

fn post(uri: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn admin_page_lists_submissions() {
    let state = test_state("admin_page");
    stored_submission(&state);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200, "Admin page should load");

    let body = body_string(resp);
    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("3 Oak Ave"));
    assert!(body.contains("/regenerate"));
}

#[test]
fn admin_can_change_status() {
    let state = test_state("admin_status");
    let id = stored_submission(&state);

    for (action, expected) in [
        ("verify", VerificationStatus::Verified),
        ("reject", VerificationStatus::Rejected),
        ("pending", VerificationStatus::Pending),
    ] {
        let resp = handle(post(format!("/admin/submissions/{id}/{action}")), &state)
            .expect("Handler failed");

        assert_eq!(resp.status(), 302, "Should redirect after {action}");
        assert_eq!(
            resp.headers().get("Location").unwrap().to_str().unwrap(),
            "/admin"
        );
        let stored = state.db.with_conn(|conn| get_submission(conn, id)).unwrap();
        assert_eq!(stored.status, expected);
    }
}

#[test]
fn admin_can_regenerate_prediction() {
    let state = test_state("admin_regenerate");
    let id = stored_submission(&state);

    let before = state.db.with_conn(|conn| get_submission(conn, id)).unwrap();
    assert_eq!(before.predicted_price, None);

    let resp = handle(post(format!("/admin/submissions/{id}/regenerate")), &state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 302);

    let after = state.db.with_conn(|conn| get_submission(conn, id)).unwrap();
    assert!(after.predicted_price.unwrap() > 0.0);
    assert_eq!(after.prediction_confidence, Some(90.0));
}

#[test]
fn unknown_submission_or_action_is_not_found() {
    let state = test_state("admin_not_found");
    let id = stored_submission(&state);

    assert!(handle(post("/admin/submissions/999/verify".into()), &state).is_err());
    assert!(handle(post(format!("/admin/submissions/{id}/archive")), &state).is_err());
    assert!(handle(post("/admin/submissions/abc/verify".into()), &state).is_err());
}
