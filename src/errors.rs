// errors.rs
use std::fmt;

/// Failures surfaced by the feature derivation and inference pipeline.
/// The core never swallows these; the caller decides whether to show them
/// to a user or log them.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// A required field is missing or out of its declared bound.
    InvalidInput(String),
    /// A feature record lacks a column the loaded model requires.
    SchemaMismatch(String),
    /// The model artifact is missing or corrupt.
    ModelUnavailable(String),
}

impl EstimateError {
    /// Short machine-readable name, echoed in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput(_) => "InvalidInput",
            EstimateError::SchemaMismatch(_) => "SchemaMismatch",
            EstimateError::ModelUnavailable(_) => "ModelUnavailable",
        }
    }
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            EstimateError::SchemaMismatch(msg) => write!(f, "Schema mismatch: {msg}"),
            EstimateError::ModelUnavailable(msg) => write!(f, "Model unavailable: {msg}"),
        }
    }
}

impl std::error::Error for EstimateError {}

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, model).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    DbError(String),
    InternalError,
    XlsxError(String),
    Estimate(EstimateError),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Estimate(EstimateError::InvalidInput(_)) => 400,
            ServerError::Estimate(EstimateError::ModelUnavailable(_)) => 503,
            ServerError::Estimate(EstimateError::SchemaMismatch(_)) => 500,
            ServerError::DbError(_) | ServerError::InternalError | ServerError::XlsxError(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::NotFound => "NotFound",
            ServerError::BadRequest(_) => "BadRequest",
            ServerError::DbError(_) => "DbError",
            ServerError::InternalError => "InternalError",
            ServerError::XlsxError(_) => "XlsxError",
            ServerError::Estimate(e) => e.kind(),
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
            ServerError::XlsxError(msg) => write!(f, "Spreadsheet Error: {msg}"),
            ServerError::Estimate(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<EstimateError> for ServerError {
    fn from(err: EstimateError) -> Self {
        ServerError::Estimate(err)
    }
}
