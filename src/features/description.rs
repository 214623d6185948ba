// src/features/description.rs

use serde::{Deserialize, Serialize};

use super::vocab::Neighborhood;
use crate::errors::EstimateError;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 10;
pub const MIN_YEAR: i64 = 1800;
pub const MAX_YEAR: i64 = 2100;

/// Closed set of property categories a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Townhouse,
    Condo,
    MultiFamily,
    Luxury,
    Commercial,
    Land,
}

impl PropertyType {
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single_family" => Some(PropertyType::SingleFamily),
            "townhouse" => Some(PropertyType::Townhouse),
            "condo" => Some(PropertyType::Condo),
            "multi_family" => Some(PropertyType::MultiFamily),
            "luxury" => Some(PropertyType::Luxury),
            "commercial" => Some(PropertyType::Commercial),
            "land" => Some(PropertyType::Land),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "single_family",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Condo => "condo",
            PropertyType::MultiFamily => "multi_family",
            PropertyType::Luxury => "luxury",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
        }
    }
}

/// User-facing quality scale for exterior, kitchen, basement and amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityRating {
    Excellent,
    Good,
    Average,
    Fair,
    Poor,
    /// The feature does not exist (no basement, no pool, ...).
    Absent,
}

impl QualityRating {
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(QualityRating::Excellent),
            "good" => Some(QualityRating::Good),
            "average" => Some(QualityRating::Average),
            "fair" => Some(QualityRating::Fair),
            "poor" => Some(QualityRating::Poor),
            "none" => Some(QualityRating::Absent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityRating::Excellent => "excellent",
            QualityRating::Good => "good",
            QualityRating::Average => "average",
            QualityRating::Fair => "fair",
            QualityRating::Poor => "poor",
            QualityRating::Absent => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// The only location field the model consumes.
    pub neighborhood: Neighborhood,
}

/// Validated, partial description of a property. `None` in a categorical
/// field means the supplied value was not recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescription {
    pub property_type: Option<PropertyType>,
    pub location: Location,

    pub bedrooms: i64,
    /// 2.5 means two full baths and one half bath.
    pub bathrooms: f64,
    pub living_area: i64,
    pub lot_area: i64,
    pub lot_frontage: Option<i64>,
    pub year_built: i64,
    pub year_remodeled: Option<i64>,

    pub overall_quality: i64,
    pub overall_condition: i64,

    pub garage_cars: i64,
    pub garage_area: i64,
    pub basement_area: i64,
    pub basement_quality: Option<QualityRating>,

    pub exterior_quality: Option<QualityRating>,
    pub kitchen_quality: Option<QualityRating>,

    pub has_pool: bool,
    pub pool_quality: Option<QualityRating>,
    pub has_fireplace: bool,
    pub fireplace_quality: Option<QualityRating>,
}

fn invalid(msg: impl Into<String>) -> EstimateError {
    EstimateError::InvalidInput(msg.into())
}

fn non_negative(name: &str, value: i64) -> Result<(), EstimateError> {
    if value < 0 {
        return Err(invalid(format!("{name} must be >= 0, got {value}")));
    }
    Ok(())
}

fn in_range(name: &str, value: i64, min: i64, max: i64) -> Result<(), EstimateError> {
    if value < min || value > max {
        return Err(invalid(format!("{name} must be in {min}..={max}, got {value}")));
    }
    Ok(())
}

impl PropertyDescription {
    /// A plain single-family description with every optional field at its
    /// form default. Handy as a starting point for callers and tests.
    pub fn new(
        bedrooms: i64,
        bathrooms: f64,
        living_area: i64,
        lot_area: i64,
        year_built: i64,
        overall_quality: i64,
        overall_condition: i64,
    ) -> Self {
        PropertyDescription {
            property_type: Some(PropertyType::SingleFamily),
            location: Location::default(),
            bedrooms,
            bathrooms,
            living_area,
            lot_area,
            lot_frontage: None,
            year_built,
            year_remodeled: None,
            overall_quality,
            overall_condition,
            garage_cars: 0,
            garage_area: 0,
            basement_area: 0,
            basement_quality: Some(QualityRating::Absent),
            exterior_quality: None,
            kitchen_quality: None,
            has_pool: false,
            pool_quality: Some(QualityRating::Absent),
            has_fireplace: false,
            fireplace_quality: Some(QualityRating::Absent),
        }
    }

    /// Check every declared numeric bound.
    pub fn validate(&self) -> Result<(), EstimateError> {
        non_negative("bedrooms", self.bedrooms)?;
        if !self.bathrooms.is_finite() || self.bathrooms < 0.0 {
            return Err(invalid(format!(
                "bathrooms must be a number >= 0, got {}",
                self.bathrooms
            )));
        }
        non_negative("living_area", self.living_area)?;
        non_negative("lot_area", self.lot_area)?;
        if let Some(frontage) = self.lot_frontage {
            non_negative("lot_frontage", frontage)?;
        }
        non_negative("garage_cars", self.garage_cars)?;
        non_negative("garage_area", self.garage_area)?;
        non_negative("basement_area", self.basement_area)?;

        in_range("overall_quality", self.overall_quality, MIN_RATING, MAX_RATING)?;
        in_range("overall_condition", self.overall_condition, MIN_RATING, MAX_RATING)?;

        in_range("year_built", self.year_built, MIN_YEAR, MAX_YEAR)?;
        if let Some(remodeled) = self.year_remodeled {
            in_range("year_remodeled", remodeled, self.year_built, MAX_YEAR)?;
        }
        Ok(())
    }
}

/// Raw submission body. Every field is optional so that a missing required
/// field is reported as an invalid input rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PropertyForm {
    pub property_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub neighborhood: Option<String>,

    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub living_area: Option<i64>,
    pub lot_area: Option<i64>,
    pub lot_frontage: Option<i64>,
    pub year_built: Option<i64>,
    pub year_remodeled: Option<i64>,

    pub overall_quality: Option<i64>,
    pub overall_condition: Option<i64>,

    pub garage_cars: Option<i64>,
    pub garage_area: Option<i64>,
    pub basement_area: Option<i64>,
    pub basement_quality: Option<String>,

    pub exterior_quality: Option<String>,
    pub kitchen_quality: Option<String>,

    pub has_pool: Option<bool>,
    pub pool_quality: Option<String>,
    pub has_fireplace: Option<bool>,
    pub fireplace_quality: Option<String>,
}

fn required<T>(name: &str, value: Option<T>) -> Result<T, EstimateError> {
    value.ok_or_else(|| invalid(format!("missing required field {name}")))
}

/// Absent means "none"; present but unrecognized maps to `None`.
fn amenity_quality(raw: Option<&str>) -> Option<QualityRating> {
    match raw {
        None => Some(QualityRating::Absent),
        Some(s) => QualityRating::from_name(s),
    }
}

impl TryFrom<&PropertyForm> for PropertyDescription {
    type Error = EstimateError;

    fn try_from(form: &PropertyForm) -> Result<Self, Self::Error> {
        let neighborhood = form
            .neighborhood
            .as_deref()
            .map(|raw| {
                Neighborhood::resolve(raw).unwrap_or_else(|| {
                    log::debug!("unknown neighborhood {raw:?}, using default");
                    Neighborhood::default()
                })
            })
            .unwrap_or_default();

        let description = PropertyDescription {
            property_type: form.property_type.as_deref().and_then(PropertyType::from_name),
            location: Location {
                address: form.address.clone().unwrap_or_default(),
                city: form.city.clone().unwrap_or_default(),
                state: form.state.clone().unwrap_or_default(),
                zip_code: form.zip_code.clone().unwrap_or_default(),
                neighborhood,
            },
            bedrooms: required("bedrooms", form.bedrooms)?,
            bathrooms: required("bathrooms", form.bathrooms)?,
            living_area: required("living_area", form.living_area)?,
            lot_area: required("lot_area", form.lot_area)?,
            lot_frontage: form.lot_frontage,
            year_built: required("year_built", form.year_built)?,
            year_remodeled: form.year_remodeled,
            overall_quality: required("overall_quality", form.overall_quality)?,
            overall_condition: required("overall_condition", form.overall_condition)?,
            garage_cars: form.garage_cars.unwrap_or(0),
            garage_area: form.garage_area.unwrap_or(0),
            basement_area: form.basement_area.unwrap_or(0),
            basement_quality: amenity_quality(form.basement_quality.as_deref()),
            exterior_quality: form.exterior_quality.as_deref().and_then(QualityRating::from_name),
            kitchen_quality: form.kitchen_quality.as_deref().and_then(QualityRating::from_name),
            has_pool: form.has_pool.unwrap_or(false),
            pool_quality: amenity_quality(form.pool_quality.as_deref()),
            has_fireplace: form.has_fireplace.unwrap_or(false),
            fireplace_quality: amenity_quality(form.fireplace_quality.as_deref()),
        };

        description.validate()?;
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> PropertyForm {
        PropertyForm {
            property_type: Some("single_family".into()),
            neighborhood: Some("College Creek".into()),
            bedrooms: Some(3),
            bathrooms: Some(2.5),
            living_area: Some(1800),
            lot_area: Some(8000),
            year_built: Some(1998),
            overall_quality: Some(7),
            overall_condition: Some(5),
            ..PropertyForm::default()
        }
    }

    #[test]
    fn complete_form_converts() {
        let desc = PropertyDescription::try_from(&complete_form()).unwrap();
        assert_eq!(desc.property_type, Some(PropertyType::SingleFamily));
        assert_eq!(desc.location.neighborhood, Neighborhood::CollgCr);
        assert_eq!(desc.basement_quality, Some(QualityRating::Absent));
        assert_eq!(desc.exterior_quality, None);
        assert!(!desc.has_pool);
    }

    #[test]
    fn missing_required_field_is_invalid_input() {
        let form = PropertyForm {
            living_area: None,
            ..complete_form()
        };
        let err = PropertyDescription::try_from(&form).unwrap_err();
        assert_eq!(
            err,
            EstimateError::InvalidInput("missing required field living_area".into())
        );
    }

    #[test]
    fn bounds_are_enforced() {
        let cases = [
            PropertyForm { basement_area: Some(-1), ..complete_form() },
            PropertyForm { overall_quality: Some(11), ..complete_form() },
            PropertyForm { overall_condition: Some(0), ..complete_form() },
            PropertyForm { bathrooms: Some(-0.5), ..complete_form() },
            PropertyForm { year_remodeled: Some(1990), ..complete_form() },
        ];
        for form in cases {
            assert!(matches!(
                PropertyDescription::try_from(&form),
                Err(EstimateError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn unrecognized_categories_do_not_fail() {
        let form = PropertyForm {
            property_type: Some("castle".into()),
            neighborhood: Some("Springfield".into()),
            kitchen_quality: Some("superb".into()),
            pool_quality: Some("olympic".into()),
            ..complete_form()
        };
        let desc = PropertyDescription::try_from(&form).unwrap();
        assert_eq!(desc.property_type, None);
        assert_eq!(desc.location.neighborhood, Neighborhood::NAmes);
        assert_eq!(desc.kitchen_quality, None);
        assert_eq!(desc.pool_quality, None);
    }

    #[test]
    fn form_deserializes_from_partial_json() {
        let form: PropertyForm =
            serde_json::from_str(r#"{"bedrooms": 4, "has_pool": true}"#).unwrap();
        assert_eq!(form.bedrooms, Some(4));
        assert_eq!(form.has_pool, Some(true));
        assert_eq!(form.lot_area, None);
    }
}
