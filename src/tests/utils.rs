use crate::db::{init_db, Database};
use crate::errors::EstimateError;
use crate::features::{ModelFeatureRecord, COLUMNS};
use crate::inference::{FeatureTable, InferenceEngine, PriceModel};
use crate::router::AppState;
use astra::Response;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh SQLite file in the temp dir, initialized from the production schema.
pub fn init_test_db(name: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "{name}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path);
    init_db(&db, Path::new(env!("CARGO_MANIFEST_DIR")).join("sql/schema.sql"))
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn bundled_engine() -> InferenceEngine {
    InferenceEngine::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("models/house_price_linear.json"))
        .expect("bundled model should load")
}

pub fn test_state(name: &str) -> AppState {
    AppState {
        db: init_test_db(name),
        engine: bundled_engine(),
        chunk_size: 2,
    }
}

/// Wants a column no feature record has.
pub struct SkewedModel;

impl PriceModel for SkewedModel {
    fn name(&self) -> &str {
        "skewed"
    }
    fn version(&self) -> &str {
        "0"
    }
    fn feature_names(&self) -> &[String] {
        static FEATURES: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
        FEATURES.get_or_init(|| vec!["SalePrice".to_string()])
    }
    fn predict(&self, _table: &FeatureTable) -> Result<Vec<f64>, EstimateError> {
        unreachable!("schema check runs first")
    }
}

pub fn skewed_state(name: &str) -> AppState {
    AppState {
        db: init_test_db(name),
        engine: InferenceEngine::from_model(Arc::new(SkewedModel)),
        chunk_size: 500,
    }
}

/// CSV with an `Id` column followed by every schema column, one line per
/// `(id, record)`.
pub fn records_csv(records: &[(i64, ModelFeatureRecord)]) -> String {
    let mut out = String::from("Id");
    for column in COLUMNS {
        out.push(',');
        out.push_str(column);
    }
    out.push('\n');
    for (id, record) in records {
        out.push_str(&id.to_string());
        for column in COLUMNS {
            out.push(',');
            let cell = record.value(column).map(|v| v.to_string()).unwrap_or_default();
            if cell.contains(' ') {
                out.push_str(&format!("\"{cell}\""));
            } else {
                out.push_str(&cell);
            }
        }
        out.push('\n');
    }
    out
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response should be JSON")
}
