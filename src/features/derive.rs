// src/features/derive.rs

//! Expansion of a `PropertyDescription` into a complete `ModelFeatureRecord`.
//!
//! Every rule here is a pure function of the description (and, for the sale
//! month/year, of the derivation date). The floor and basement splits are
//! pricing policy constants, not physical facts about a house.

use chrono::{Datelike, NaiveDate, Utc};

use super::description::{PropertyDescription, PropertyType, QualityRating};
use super::record::ModelFeatureRecord;
use super::vocab::*;
use crate::errors::EstimateError;

/// Lot frontage used when there is no lot area to estimate it from.
pub const DEFAULT_LOT_FRONTAGE: i64 = 80;
/// Share of the basement counted as type-1 finished area, in tenths.
pub const BASEMENT_FINISHED_TENTHS: i64 = 6;
/// Above this many bedrooms the living area is split over two floors.
pub const SINGLE_FLOOR_MAX_BEDROOMS: i64 = 3;
pub const POOL_AREA: i64 = 200;
pub const OPEN_PORCH_SF: i64 = 100;

/// Model fields that a property category fans out into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCodes {
    pub ms_sub_class: i64,
    pub ms_zoning: MsZoning,
    pub bldg_type: BldgType,
}

/// Codes used for an unrecognized property category.
pub const DEFAULT_TYPE_CODES: TypeCodes = TypeCodes {
    ms_sub_class: 20,
    ms_zoning: MsZoning::RL,
    bldg_type: BldgType::OneFam,
};

const TYPE_CODES: &[(PropertyType, TypeCodes)] = &[
    (PropertyType::SingleFamily, TypeCodes { ms_sub_class: 20, ms_zoning: MsZoning::RL, bldg_type: BldgType::OneFam }),
    (PropertyType::Townhouse, TypeCodes { ms_sub_class: 30, ms_zoning: MsZoning::RM, bldg_type: BldgType::TwnhsE }),
    (PropertyType::Condo, TypeCodes { ms_sub_class: 50, ms_zoning: MsZoning::RM, bldg_type: BldgType::Twnhs }),
    (PropertyType::MultiFamily, TypeCodes { ms_sub_class: 70, ms_zoning: MsZoning::RM, bldg_type: BldgType::TwoFmCon }),
    (PropertyType::Luxury, TypeCodes { ms_sub_class: 80, ms_zoning: MsZoning::RL, bldg_type: BldgType::OneFam }),
    (PropertyType::Commercial, TypeCodes { ms_sub_class: 90, ms_zoning: MsZoning::C, bldg_type: BldgType::OneFam }),
    (PropertyType::Land, TypeCodes { ms_sub_class: 180, ms_zoning: MsZoning::RL, bldg_type: BldgType::OneFam }),
];

const GRADES: &[(QualityRating, Grade)] = &[
    (QualityRating::Excellent, Grade::Ex),
    (QualityRating::Good, Grade::Gd),
    (QualityRating::Average, Grade::TA),
    (QualityRating::Fair, Grade::Fa),
    (QualityRating::Poor, Grade::Po),
    (QualityRating::Absent, Grade::NA),
];

pub fn type_codes(property_type: Option<PropertyType>) -> TypeCodes {
    property_type
        .and_then(|kind| TYPE_CODES.iter().find(|(k, _)| *k == kind))
        .map(|(_, codes)| *codes)
        .unwrap_or(DEFAULT_TYPE_CODES)
}

pub fn house_style(bedrooms: i64) -> HouseStyle {
    if bedrooms <= 3 {
        HouseStyle::OneStory
    } else if bedrooms <= 5 {
        HouseStyle::TwoStory
    } else {
        HouseStyle::SLvl
    }
}

/// Recode a user rating; an unrecognized rating is `TA`.
pub fn grade(rating: Option<QualityRating>) -> Grade {
    rating
        .and_then(|r| GRADES.iter().find(|(q, _)| *q == r))
        .map(|(_, g)| *g)
        .unwrap_or(Grade::TA)
}

/// Amenity quality is `NA` whenever the amenity is missing.
pub fn amenity_grade(present: bool, rating: Option<QualityRating>) -> Grade {
    if present {
        grade(rating)
    } else {
        Grade::NA
    }
}

/// (full baths, half baths) from a fractional bathroom count.
pub fn split_bathrooms(bathrooms: f64) -> (i64, i64) {
    let full = bathrooms.floor();
    let half = ((bathrooms - full) * 2.0).round();
    (full as i64, half as i64)
}

/// (finished type 1, finished type 2, unfinished). Sums to `area`.
pub fn split_basement(area: i64) -> (i64, i64, i64) {
    if area <= 0 {
        return (0, 0, 0);
    }
    let finished = area / 10 * BASEMENT_FINISHED_TENTHS + area % 10 * BASEMENT_FINISHED_TENTHS / 10;
    (finished, 0, area - finished)
}

/// (first floor, second floor). Sums to `living_area`.
pub fn split_floors(living_area: i64, bedrooms: i64) -> (i64, i64) {
    let living_area = living_area.max(0);
    if bedrooms > SINGLE_FLOOR_MAX_BEDROOMS {
        let second = living_area / 2;
        (living_area - second, second)
    } else {
        (living_area, 0)
    }
}

/// Square-lot estimate of the street frontage.
pub fn estimate_lot_frontage(lot_area: i64) -> i64 {
    if lot_area <= 0 {
        return DEFAULT_LOT_FRONTAGE;
    }
    let mut root = (lot_area as f64).sqrt() as i64;
    // correct float rounding at perfect squares
    while root.checked_mul(root).map_or(true, |sq| sq > lot_area) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= lot_area) {
        root += 1;
    }
    root
}

/// Derive with today's date for the sale month and year.
pub fn derive(description: &PropertyDescription) -> Result<ModelFeatureRecord, EstimateError> {
    derive_at(description, Utc::now().date_naive())
}

/// Derive a complete record, dating the sale at `sale_date`.
pub fn derive_at(
    description: &PropertyDescription,
    sale_date: NaiveDate,
) -> Result<ModelFeatureRecord, EstimateError> {
    description.validate()?;
    let d = description;

    let codes = type_codes(d.property_type);
    let (full_bath, half_bath) = split_bathrooms(d.bathrooms);
    let (bsmt_fin_sf1, bsmt_fin_sf2, bsmt_unf_sf) = split_basement(d.basement_area);
    let (first_flr_sf, second_flr_sf) = split_floors(d.living_area, d.bedrooms);

    Ok(ModelFeatureRecord {
        ms_sub_class: codes.ms_sub_class,
        ms_zoning: codes.ms_zoning,
        lot_frontage: d
            .lot_frontage
            .unwrap_or_else(|| estimate_lot_frontage(d.lot_area)),
        lot_area: d.lot_area,
        street: Street::Pave,
        alley: Alley::NA,
        lot_shape: LotShape::Reg,
        land_contour: LandContour::Lvl,
        utilities: Utilities::AllPub,
        lot_config: LotConfig::Inside,
        land_slope: LandSlope::Gtl,
        neighborhood: d.location.neighborhood,
        condition1: Proximity::Norm,
        condition2: Proximity::Norm,
        bldg_type: codes.bldg_type,
        house_style: house_style(d.bedrooms),
        overall_qual: d.overall_quality,
        overall_cond: d.overall_condition,
        year_built: d.year_built,
        year_remod_add: d.year_remodeled.unwrap_or(d.year_built),
        roof_style: RoofStyle::Gable,
        roof_matl: RoofMatl::CompShg,
        exterior1st: Exterior::VinylSd,
        exterior2nd: Exterior::VinylSd,
        mas_vnr_type: MasVnrType::NoVeneer,
        mas_vnr_area: 0,
        exter_qual: grade(d.exterior_quality),
        exter_cond: Grade::TA,
        foundation: Foundation::PConc,
        bsmt_qual: grade(d.basement_quality),
        bsmt_cond: Grade::TA,
        bsmt_exposure: BsmtExposure::No,
        bsmt_fin_type1: BsmtFinType::GLQ,
        bsmt_fin_sf1,
        bsmt_fin_type2: BsmtFinType::Unf,
        bsmt_fin_sf2,
        bsmt_unf_sf,
        total_bsmt_sf: d.basement_area,
        heating: Heating::GasA,
        heating_qc: Grade::Ex,
        central_air: CentralAir::Y,
        electrical: Electrical::SBrkr,
        first_flr_sf,
        second_flr_sf,
        low_qual_fin_sf: 0,
        gr_liv_area: d.living_area,
        bsmt_full_bath: 0,
        bsmt_half_bath: 0,
        full_bath,
        half_bath,
        bedroom_abv_gr: d.bedrooms,
        kitchen_abv_gr: 1,
        kitchen_qual: grade(d.kitchen_quality),
        tot_rms_abv_grd: d.bedrooms.saturating_add(2),
        functional: Functional::Typ,
        fireplaces: if d.has_fireplace { 1 } else { 0 },
        fireplace_qu: amenity_grade(d.has_fireplace, d.fireplace_quality),
        garage_type: GarageType::Attchd,
        garage_yr_blt: d.year_built,
        garage_finish: GarageFinish::Fin,
        garage_cars: d.garage_cars,
        garage_area: d.garage_area,
        garage_qual: Grade::TA,
        garage_cond: Grade::TA,
        paved_drive: PavedDrive::Y,
        wood_deck_sf: 0,
        open_porch_sf: OPEN_PORCH_SF,
        enclosed_porch: 0,
        three_ssn_porch: 0,
        screen_porch: 0,
        pool_area: if d.has_pool { POOL_AREA } else { 0 },
        pool_qc: amenity_grade(d.has_pool, d.pool_quality),
        fence: Fence::NA,
        misc_feature: MiscFeature::NA,
        misc_val: 0,
        mo_sold: i64::from(sale_date.month()),
        yr_sold: i64::from(sale_date.year()),
        sale_type: SaleType::WD,
        sale_condition: SaleCondition::Normal,
    })
}
