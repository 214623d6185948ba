//! Feature derivation: from a partial property description (or a complete
//! tabular row) to the fixed-schema record the price model consumes.

pub mod derive;
pub mod description;
pub mod record;
pub mod rows;
pub mod vocab;

pub use derive::{derive, derive_at};
pub use description::{Location, PropertyDescription, PropertyForm, PropertyType, QualityRating};
pub use record::{FeatureValue, ModelFeatureRecord, COLUMNS};
pub use rows::{derive_many, TabularRow};
