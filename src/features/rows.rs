// src/features/rows.rs

//! Batch path for uploads that already carry the full dataset schema.
//!
//! Rows are validated and forwarded, not derived: the only filling done here
//! is for numeric columns the dataset itself leaves empty, using the same
//! rules as single-property derivation.

use std::collections::HashMap;

use super::derive::{estimate_lot_frontage, DEFAULT_LOT_FRONTAGE};
use super::description::{MAX_RATING, MIN_RATING};
use super::record::{FeatureValue, ModelFeatureRecord, COLUMNS};
use crate::errors::EstimateError;

/// One tabular row: column name to raw cell text.
pub type TabularRow = HashMap<String, String>;

/// Numeric columns that fall back to zero when the cell is empty or `NA`.
const ZERO_WHEN_MISSING: &[&str] = &[
    "MasVnrArea",
    "BsmtFinSF1",
    "BsmtFinSF2",
    "BsmtUnfSF",
    "TotalBsmtSF",
    "BsmtFullBath",
    "BsmtHalfBath",
    "GarageCars",
    "GarageArea",
];

fn is_missing(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("NA") || raw.eq_ignore_ascii_case("nan")
}

/// Replacement cells for the imputable numeric columns of `row`. Only cells
/// that are present but empty are filled; an absent column stays absent.
fn imputations(row: &TabularRow) -> HashMap<&'static str, String> {
    let mut filled = HashMap::new();
    let cell_missing =
        |column: &str| row.get(column).map(|raw| is_missing(raw)).unwrap_or(false);

    for column in ZERO_WHEN_MISSING {
        if cell_missing(*column) {
            filled.insert(*column, "0".to_string());
        }
    }

    if cell_missing("LotFrontage") {
        let frontage = row
            .get("LotArea")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .map(|area| estimate_lot_frontage(area as i64))
            .unwrap_or(DEFAULT_LOT_FRONTAGE);
        filled.insert("LotFrontage", frontage.to_string());
    }

    if cell_missing("GarageYrBlt") {
        if let Some(year) = row.get("YearBuilt").filter(|raw| !is_missing(raw)) {
            filled.insert("GarageYrBlt", year.clone());
        }
    }

    filled
}

fn area_sum(sum: Option<i64>) -> String {
    sum.map_or_else(|| "an overflowing total".to_string(), |n| n.to_string())
}

fn check_row(record: &ModelFeatureRecord) -> Result<(), EstimateError> {
    for (column, value) in record.values() {
        if let FeatureValue::Int(n) = value {
            if n < 0 {
                return Err(EstimateError::InvalidInput(format!(
                    "column {column} must be >= 0, got {n}"
                )));
            }
        }
    }

    for (column, rating) in [
        ("OverallQual", record.overall_qual),
        ("OverallCond", record.overall_cond),
    ] {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(EstimateError::InvalidInput(format!(
                "column {column} must be in {MIN_RATING}..={MAX_RATING}, got {rating}"
            )));
        }
    }

    let floors = record
        .first_flr_sf
        .checked_add(record.second_flr_sf)
        .and_then(|sum| sum.checked_add(record.low_qual_fin_sf));
    if floors != Some(record.gr_liv_area) {
        return Err(EstimateError::InvalidInput(format!(
            "1stFlrSF + 2ndFlrSF + LowQualFinSF = {} but GrLivArea = {}",
            area_sum(floors),
            record.gr_liv_area
        )));
    }

    let basement = record
        .bsmt_fin_sf1
        .checked_add(record.bsmt_fin_sf2)
        .and_then(|sum| sum.checked_add(record.bsmt_unf_sf));
    if basement != Some(record.total_bsmt_sf) {
        return Err(EstimateError::InvalidInput(format!(
            "BsmtFinSF1 + BsmtFinSF2 + BsmtUnfSF = {} but TotalBsmtSF = {}",
            area_sum(basement),
            record.total_bsmt_sf
        )));
    }

    Ok(())
}

/// Validate and convert one complete row.
pub fn derive_row(row: &TabularRow) -> Result<ModelFeatureRecord, EstimateError> {
    let filled = imputations(row);
    let record = ModelFeatureRecord::from_cells(|column| {
        filled
            .get(column)
            .map(String::as_str)
            .or_else(|| row.get(column).map(String::as_str))
    })?;
    check_row(&record)?;
    Ok(record)
}

/// Convert a batch of complete rows. Any bad row fails the whole batch and
/// the error names the row (1-based, as a spreadsheet would show it).
pub fn derive_many(rows: &[TabularRow]) -> Result<Vec<ModelFeatureRecord>, EstimateError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            derive_row(row).map_err(|err| match err {
                EstimateError::InvalidInput(msg) => {
                    EstimateError::InvalidInput(format!("row {}: {msg}", i + 1))
                }
                other => other,
            })
        })
        .collect()
}

/// Schema columns absent from a row, logged when an upload is rejected.
pub fn missing_columns(row: &TabularRow) -> Vec<&'static str> {
    COLUMNS
        .iter()
        .copied()
        .filter(|column| !row.contains_key(*column))
        .collect()
}
