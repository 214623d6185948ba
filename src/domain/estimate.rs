// src/domain/estimate.rs

use serde::Serialize;

use crate::features::{ModelFeatureRecord, TabularRow};

/// One line of a bulk prediction response: the price plus a few echoed
/// fields so the caller can tell rows apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub id: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub sqft_living: i64,
    pub neighborhood: String,
    pub year_built: i64,
    pub predicted_price: f64,
}

/// Pair each price with the row it came from. The row's own `Id` is used
/// when it parses, otherwise the 1-based position.
pub fn attach_metadata(
    rows: &[TabularRow],
    records: &[ModelFeatureRecord],
    prices: &[f64],
) -> Vec<PredictionRow> {
    records
        .iter()
        .zip(prices)
        .enumerate()
        .map(|(i, (record, price))| {
            let id = rows
                .get(i)
                .and_then(|row| row.get("Id"))
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(i as i64 + 1);
            PredictionRow {
                id,
                bedrooms: record.bedroom_abv_gr,
                bathrooms: record.full_bath,
                sqft_living: record.gr_liv_area,
                neighborhood: record.neighborhood.code().to_string(),
                year_built: record.year_built,
                predicted_price: *price,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl BatchSummary {
    pub fn from_prices(prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = prices.iter().sum::<f64>() / prices.len() as f64;
        Some(Self {
            count: prices.len(),
            min,
            max,
            mean,
        })
    }
}
