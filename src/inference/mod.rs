pub mod engine;
pub mod linear;
pub mod model;

pub use engine::InferenceEngine;
pub use linear::LinearModel;
pub use model::{Exclusive, ExclusiveModel, FeatureTable, PriceModel};
