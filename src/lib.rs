//! Residential price estimation: feature derivation from sparse property
//! descriptions, inference over a loaded regression model, and the small
//! HTTP application around them.

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod features;
pub mod inference;
pub mod responses;
pub mod router;
pub mod spreadsheets;
pub mod templates;
pub mod uploads;

#[cfg(test)]
mod tests;

pub use errors::{EstimateError, ServerError};
pub use features::{derive, derive_at, derive_many, ModelFeatureRecord, PropertyDescription};
pub use inference::{InferenceEngine, PriceModel};
