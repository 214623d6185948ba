// src/inference/engine.rs

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use super::linear::LinearModel;
use super::model::{FeatureTable, PriceModel};
use crate::errors::EstimateError;
use crate::features::{ModelFeatureRecord, COLUMNS};

/// Owns the loaded model and turns feature records into prices.
///
/// Cheap to clone: every clone shares the same model.
#[derive(Clone)]
pub struct InferenceEngine {
    model: Arc<dyn PriceModel>,
}

impl InferenceEngine {
    /// Load a JSON linear model artifact. Any I/O or parse failure is
    /// `ModelUnavailable`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EstimateError> {
        let path = path.as_ref();
        let model = LinearModel::from_file(path)?;
        info!(
            "Loaded model {} v{} ({} features) from {}",
            model.name,
            model.version,
            model.features.len(),
            path.display()
        );
        Ok(Self::from_model(Arc::new(model)))
    }

    pub fn from_model(model: Arc<dyn PriceModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn model_version(&self) -> &str {
        self.model.version()
    }

    pub fn feature_importances(&self) -> Option<Vec<(String, f64)>> {
        self.model.feature_importances()
    }

    fn table(&self, records: &[ModelFeatureRecord]) -> Result<FeatureTable, EstimateError> {
        let columns = self.model.feature_names().to_vec();
        if let Some(unknown) = columns.iter().find(|c| !COLUMNS.contains(&c.as_str())) {
            return Err(EstimateError::SchemaMismatch(format!(
                "model {} requires column {unknown} which feature records do not carry",
                self.model.name()
            )));
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .filter_map(|column| record.value(column))
                    .collect()
            })
            .collect();
        Ok(FeatureTable { columns, rows })
    }

    /// One price per record, in input order.
    pub fn predict(&self, records: &[ModelFeatureRecord]) -> Result<Vec<f64>, EstimateError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let table = self.table(records)?;
        let prices = self.model.predict(&table)?;
        if prices.len() != records.len() {
            return Err(EstimateError::SchemaMismatch(format!(
                "model {} returned {} predictions for {} rows",
                self.model.name(),
                prices.len(),
                records.len()
            )));
        }
        debug!("Predicted {} rows with {}", prices.len(), self.model.name());
        Ok(prices)
    }

    /// Same output as [`predict`](Self::predict), built from tables of at
    /// most `chunk_size` rows.
    pub fn predict_chunked(
        &self,
        records: &[ModelFeatureRecord],
        chunk_size: usize,
    ) -> Result<Vec<f64>, EstimateError> {
        let chunk_size = chunk_size.max(1);
        let mut prices = Vec::with_capacity(records.len());
        for chunk in records.chunks(chunk_size) {
            prices.extend(self.predict(chunk)?);
        }
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureValue;
    use crate::inference::model::{Exclusive, ExclusiveModel};
    use std::thread;

    /// Echoes GrLivArea back as the price.
    struct AreaEcho {
        features: Vec<String>,
    }

    impl AreaEcho {
        fn new(features: &[&str]) -> Self {
            Self {
                features: features.iter().map(|f| f.to_string()).collect(),
            }
        }
    }

    impl PriceModel for AreaEcho {
        fn name(&self) -> &str {
            "area-echo"
        }
        fn version(&self) -> &str {
            "0"
        }
        fn feature_names(&self) -> &[String] {
            &self.features
        }
        fn predict(&self, table: &FeatureTable) -> Result<Vec<f64>, EstimateError> {
            let idx = table.column_index("GrLivArea").unwrap();
            Ok(table.rows.iter().map(|r| r[idx].as_f64().unwrap()).collect())
        }
    }

    struct DropsRows;

    impl PriceModel for DropsRows {
        fn name(&self) -> &str {
            "drops-rows"
        }
        fn version(&self) -> &str {
            "0"
        }
        fn feature_names(&self) -> &[String] {
            &[]
        }
        fn predict(&self, _table: &FeatureTable) -> Result<Vec<f64>, EstimateError> {
            Ok(vec![1.0])
        }
    }

    struct Counting {
        features: Vec<String>,
        calls: usize,
    }

    impl ExclusiveModel for Counting {
        fn name(&self) -> &str {
            "counting"
        }
        fn version(&self) -> &str {
            "0"
        }
        fn feature_names(&self) -> &[String] {
            &self.features
        }
        fn predict(&mut self, table: &FeatureTable) -> Result<Vec<f64>, EstimateError> {
            self.calls += 1;
            Ok(vec![self.calls as f64; table.len()])
        }
    }

    fn with_area(area: i64) -> ModelFeatureRecord {
        let mut record = ModelFeatureRecord::reference();
        record.gr_liv_area = area;
        record.first_flr_sf = area;
        record
    }

    #[test]
    fn output_follows_input_order() {
        let engine = InferenceEngine::from_model(Arc::new(AreaEcho::new(&["GrLivArea", "MSZoning"])));
        let records: Vec<_> = [900, 1500, 1200].into_iter().map(with_area).collect();
        assert_eq!(engine.predict(&records).unwrap(), vec![900.0, 1500.0, 1200.0]);
    }

    #[test]
    fn a_row_prices_the_same_alone_or_in_a_batch() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/house_price_linear.json");
        let engine = InferenceEngine::load(path).unwrap();
        let mut other = ModelFeatureRecord::reference();
        other.gr_liv_area = 2400;
        other.first_flr_sf = 2400;
        let records = vec![ModelFeatureRecord::reference(), other];

        let alone = engine.predict(&records[..1]).unwrap();
        let batch = engine.predict(&records).unwrap();
        assert_eq!(alone[0], batch[0]);
        assert_eq!(engine.predict(&records[1..]).unwrap()[0], batch[1]);
        assert_ne!(batch[0], batch[1]);
    }

    #[test]
    fn chunked_prediction_matches_whole_batch() {
        let engine = InferenceEngine::from_model(Arc::new(AreaEcho::new(&["GrLivArea"])));
        let records: Vec<_> = (1..=7).map(|i| with_area(i * 100)).collect();
        assert_eq!(
            engine.predict_chunked(&records, 3).unwrap(),
            engine.predict(&records).unwrap()
        );
    }

    #[test]
    fn empty_input_is_empty_output() {
        let engine = InferenceEngine::from_model(Arc::new(DropsRows));
        assert_eq!(engine.predict(&[]).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn unknown_model_column_is_schema_mismatch() {
        let engine = InferenceEngine::from_model(Arc::new(AreaEcho::new(&["GrLivArea", "Id"])));
        let err = engine.predict(&[ModelFeatureRecord::reference()]).unwrap_err();
        assert!(matches!(err, EstimateError::SchemaMismatch(ref m) if m.contains("Id")));
    }

    #[test]
    fn row_count_mismatch_is_schema_mismatch() {
        let engine = InferenceEngine::from_model(Arc::new(DropsRows));
        let records = vec![ModelFeatureRecord::reference(); 2];
        assert!(matches!(
            engine.predict(&records),
            Err(EstimateError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn missing_artifact_is_unavailable() {
        let path = std::env::temp_dir().join("price_estimator_no_such_model.json");
        assert!(matches!(
            InferenceEngine::load(&path),
            Err(EstimateError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn loads_bundled_artifact() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/house_price_linear.json");
        let engine = InferenceEngine::load(path).unwrap();
        let prices = engine.predict(&[ModelFeatureRecord::reference()]).unwrap();
        assert!(prices[0] > 50_000.0 && prices[0] < 400_000.0, "{}", prices[0]);
        assert!(engine.feature_importances().is_some());
    }

    #[test]
    fn shared_engine_serves_parallel_callers() {
        let engine = InferenceEngine::from_model(Arc::new(AreaEcho::new(&["GrLivArea"])));
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let engine = engine.clone();
                thread::spawn(move || engine.predict(&[with_area(i * 250)]).unwrap())
            })
            .collect();
        let got: Vec<f64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        assert_eq!(got, vec![250.0, 500.0, 750.0, 1000.0]);
    }

    #[test]
    fn exclusive_models_are_serialized() {
        let counting = Counting {
            features: vec!["OverallQual".into()],
            calls: 0,
        };
        let engine = InferenceEngine::from_model(Arc::new(Exclusive::new(counting)));
        let record = ModelFeatureRecord::reference();
        assert_eq!(engine.predict(&[record.clone()]).unwrap(), vec![1.0]);
        assert_eq!(engine.predict(&[record.clone(), record]).unwrap(), vec![2.0, 2.0]);
        assert_eq!(engine.model_name(), "counting");
    }

    #[test]
    fn feature_values_reach_the_model_by_name() {
        let engine = InferenceEngine::from_model(Arc::new(AreaEcho::new(&["Neighborhood", "GrLivArea"])));
        let table = engine.table(&[ModelFeatureRecord::reference()]).unwrap();
        assert_eq!(
            table.rows[0],
            vec![FeatureValue::Code("NAmes"), FeatureValue::Int(896)]
        );
    }
}
