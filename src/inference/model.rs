// src/inference/model.rs

use std::sync::Mutex;

use crate::errors::EstimateError;
use crate::features::FeatureValue;

/// Column-major description, row-major storage: `rows[i][j]` is the value of
/// `columns[j]` for input row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FeatureValue>>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// A trained price model: a feature table in, one price per row out.
///
/// Implementations must be safe to call from several threads at once. A
/// model whose prediction path mutates internal state should be wrapped in
/// [`Exclusive`] instead.
pub trait PriceModel: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    /// Columns the model was trained on, in the order it expects them.
    fn feature_names(&self) -> &[String];
    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, EstimateError>;

    /// Per-feature importances, when the artifact carries them.
    fn feature_importances(&self) -> Option<Vec<(String, f64)>> {
        None
    }
}

/// A model whose prediction needs exclusive access.
pub trait ExclusiveModel: Send {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn feature_names(&self) -> &[String];
    fn predict(&mut self, table: &FeatureTable) -> Result<Vec<f64>, EstimateError>;
}

/// Serializes calls into an [`ExclusiveModel`] behind a mutex.
pub struct Exclusive<M> {
    name: String,
    version: String,
    features: Vec<String>,
    inner: Mutex<M>,
}

impl<M: ExclusiveModel> Exclusive<M> {
    pub fn new(model: M) -> Self {
        Self {
            name: model.name().to_string(),
            version: model.version().to_string(),
            features: model.feature_names().to_vec(),
            inner: Mutex::new(model),
        }
    }
}

impl<M: ExclusiveModel> PriceModel for Exclusive<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, EstimateError> {
        let mut model = self.inner.lock().map_err(|_| {
            EstimateError::ModelUnavailable(format!("model {} poisoned by a panic", self.name))
        })?;
        model.predict(table)
    }
}
