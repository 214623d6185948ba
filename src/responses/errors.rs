use crate::errors::ServerError;
use crate::templates::components::error::render_error;
use astra::{Body, Response, ResponseBuilder};
use log::{error, warn};
use serde_json::json;

pub type ResultResp = Result<Response, ServerError>;

fn log_error(err: &ServerError) {
    if err.status() >= 500 {
        error!("{err}");
    } else {
        warn!("{err}");
    }
}

/// Convert a ServerError into an HTML error page.
pub fn html_error_response(err: ServerError) -> Response {
    log_error(&err);
    let message = match &err {
        ServerError::BadRequest(msg) => msg.clone(),
        other => other.to_string(),
    };
    render_error(err.status(), &message)
}

/// Convert a ServerError into `{success: false, error, error_type}`.
pub fn json_error_response(err: ServerError) -> Response {
    log_error(&err);
    let body = json!({
        "success": false,
        "error": err.to_string(),
        "error_type": err.kind(),
    });

    ResponseBuilder::new()
        .status(err.status())
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
