// src/inference/linear.rs

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{FeatureTable, PriceModel};
use crate::errors::EstimateError;
use crate::features::FeatureValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Identity,
    /// Trained on `ln(price)`; predictions are exponentiated.
    Log,
}

/// Linear regression over the feature schema, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub version: String,
    pub features: Vec<String>,
    pub intercept: f64,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub numeric: HashMap<String, f64>,
    #[serde(default)]
    pub categorical: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub feature_importances: Option<Vec<(String, f64)>>,
}

impl LinearModel {
    pub fn from_file(path: &Path) -> Result<Self, EstimateError> {
        let text = fs::read_to_string(path).map_err(|e| {
            EstimateError::ModelUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, EstimateError> {
        let model: LinearModel = serde_json::from_str(text)
            .map_err(|e| EstimateError::ModelUnavailable(format!("corrupt model artifact: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), EstimateError> {
        if self.features.is_empty() {
            return Err(EstimateError::ModelUnavailable(
                "model artifact lists no features".into(),
            ));
        }
        let coefficient_columns = self.numeric.keys().chain(self.categorical.keys());
        for column in coefficient_columns {
            if !self.features.contains(column) {
                return Err(EstimateError::ModelUnavailable(format!(
                    "coefficient for {column} which is not a model feature"
                )));
            }
        }
        if !self.intercept.is_finite() {
            return Err(EstimateError::ModelUnavailable("intercept is not finite".into()));
        }
        Ok(())
    }

    fn predict_row(&self, columns: &[String], row: &[FeatureValue]) -> Result<f64, EstimateError> {
        let mut score = self.intercept;
        for (column, value) in columns.iter().zip(row) {
            if let Some(coef) = self.numeric.get(column) {
                let x = value.as_f64().ok_or_else(|| {
                    EstimateError::SchemaMismatch(format!(
                        "numeric coefficient for {column} but value is the code {value}"
                    ))
                })?;
                score += coef * x;
            }
            if let (Some(weights), FeatureValue::Code(code)) = (self.categorical.get(column), value)
            {
                score += weights.get(*code).copied().unwrap_or(0.0);
            }
        }
        Ok(match self.target {
            Target::Identity => score,
            Target::Log => score.exp(),
        })
    }
}

impl PriceModel for LinearModel {
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
        if table.columns != self.features {
            return Err(EstimateError::SchemaMismatch(format!(
                "model {} expects {} columns, table has {}",
                self.name,
                self.features.len(),
                table.columns.len()
            )));
        }
        table
            .rows
            .iter()
            .map(|row| self.predict_row(&table.columns, row))
            .collect()
    }

    fn feature_importances(&self) -> Option<Vec<(String, f64)>> {
        self.feature_importances.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "name": "toy",
        "version": "1",
        "features": ["GrLivArea", "Neighborhood"],
        "intercept": 1000.0,
        "numeric": {"GrLivArea": 100.0},
        "categorical": {"Neighborhood": {"NoRidge": 5000.0}}
    }"#;

    fn table(rows: Vec<Vec<FeatureValue>>) -> FeatureTable {
        FeatureTable {
            columns: vec!["GrLivArea".into(), "Neighborhood".into()],
            rows,
        }
    }

    #[test]
    fn scores_numeric_and_categorical_terms() {
        let model = LinearModel::from_json(ARTIFACT).unwrap();
        let out = model
            .predict(&table(vec![
                vec![FeatureValue::Int(10), FeatureValue::Code("NoRidge")],
                vec![FeatureValue::Int(10), FeatureValue::Code("Unseen")],
            ]))
            .unwrap();
        assert_eq!(out, vec![7000.0, 2000.0]);
    }

    #[test]
    fn log_target_is_exponentiated() {
        let mut model = LinearModel::from_json(ARTIFACT).unwrap();
        model.target = Target::Log;
        model.intercept = 0.0;
        model.numeric.insert("GrLivArea".into(), 0.0);
        let out = model
            .predict(&table(vec![vec![FeatureValue::Int(1), FeatureValue::Code("x")]]))
            .unwrap();
        assert!((out[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coefficient_outside_features_is_corrupt() {
        let text = ARTIFACT.replace(r#""GrLivArea": 100.0"#, r#""LotArea": 1.0"#);
        assert!(matches!(
            LinearModel::from_json(&text),
            Err(EstimateError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn numeric_coefficient_on_code_is_schema_mismatch() {
        let model = LinearModel::from_json(ARTIFACT).unwrap();
        let err = model
            .predict(&table(vec![vec![FeatureValue::Code("RL"), FeatureValue::Code("NAmes")]]))
            .unwrap_err();
        assert!(matches!(err, EstimateError::SchemaMismatch(_)));
    }

    #[test]
    fn garbage_is_unavailable() {
        assert!(matches!(
            LinearModel::from_json("not json"),
            Err(EstimateError::ModelUnavailable(_))
        ));
    }
}
