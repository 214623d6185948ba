// src/features/record.rs

//! The model-facing feature record: one typed field per dataset column.

use serde::Serialize;
use std::fmt;

use super::vocab::*;
use crate::errors::EstimateError;

/// A single cell of a feature table, as handed to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Code(&'static str),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(n) => Some(*n as f64),
            FeatureValue::Code(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(n) => write!(f, "{n}"),
            FeatureValue::Code(c) => f.write_str(c),
        }
    }
}

pub trait IntoFeature {
    fn to_feature(&self) -> FeatureValue;
}

impl IntoFeature for i64 {
    fn to_feature(&self) -> FeatureValue {
        FeatureValue::Int(*self)
    }
}

/// Parsing of one raw tabular cell into a typed record field.
pub(crate) trait FromCell: Sized {
    fn from_cell(column: &str, raw: &str) -> Result<Self, EstimateError>;
}

impl FromCell for i64 {
    fn from_cell(column: &str, raw: &str) -> Result<Self, EstimateError> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(n);
        }
        // pandas writes integer columns holding NA as floats ("65.0")
        match raw.parse::<f64>() {
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            Ok(x) if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 => {
                Ok(x as i64)
            }
            _ => Err(EstimateError::InvalidInput(format!(
                "column {column}: expected a whole number, got {raw:?}"
            ))),
        }
    }
}

macro_rules! categorical_cells {
    ($($vocab:ident),+ $(,)?) => {
        $(
            impl FromCell for $vocab {
                fn from_cell(column: &str, raw: &str) -> Result<Self, EstimateError> {
                    Ok($vocab::from_code(raw).unwrap_or_else(|| {
                        let fallback = $vocab::default();
                        log::debug!("column {column}: unknown code {raw:?}, using {fallback}");
                        fallback
                    }))
                }
            }
        )+
    };
}

categorical_cells!(
    Grade, MsZoning, Street, Alley, LotShape, LandContour, Utilities, LotConfig, LandSlope,
    Neighborhood, Proximity, BldgType, HouseStyle, RoofStyle, RoofMatl, Exterior, MasVnrType,
    Foundation, BsmtExposure, BsmtFinType, Heating, CentralAir, Electrical, Functional,
    GarageType, GarageFinish, PavedDrive, Fence, MiscFeature, SaleType, SaleCondition,
);

macro_rules! feature_record {
    ( $( $field:ident : $ty:ty => $column:literal ),+ $(,)? ) => {
        /// Complete, fixed-schema input the trained model expects.
        /// Serializes with the dataset's column names.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct ModelFeatureRecord {
            $(
                #[serde(rename = $column)]
                pub $field: $ty,
            )+
        }

        /// Dataset column names, in dataset order.
        pub const COLUMNS: &[&str] = &[ $( $column ),+ ];

        impl ModelFeatureRecord {
            /// Value of a dataset column, `None` for columns outside the schema.
            pub fn value(&self, column: &str) -> Option<FeatureValue> {
                match column {
                    $( $column => Some(self.$field.to_feature()), )+
                    _ => None,
                }
            }

            /// Build a record by reading every column through `cell`.
            /// A column `cell` cannot supply is an invalid input.
            pub(crate) fn from_cells<'a, F>(mut cell: F) -> Result<Self, EstimateError>
            where
                F: FnMut(&'static str) -> Option<&'a str>,
            {
                Ok(ModelFeatureRecord {
                    $(
                        $field: {
                            let raw = cell($column).ok_or_else(|| {
                                EstimateError::InvalidInput(format!("missing column {}", $column))
                            })?;
                            <$ty as FromCell>::from_cell($column, raw)?
                        },
                    )+
                })
            }
        }
    };
}

feature_record! {
    ms_sub_class: i64 => "MSSubClass",
    ms_zoning: MsZoning => "MSZoning",
    lot_frontage: i64 => "LotFrontage",
    lot_area: i64 => "LotArea",
    street: Street => "Street",
    alley: Alley => "Alley",
    lot_shape: LotShape => "LotShape",
    land_contour: LandContour => "LandContour",
    utilities: Utilities => "Utilities",
    lot_config: LotConfig => "LotConfig",
    land_slope: LandSlope => "LandSlope",
    neighborhood: Neighborhood => "Neighborhood",
    condition1: Proximity => "Condition1",
    condition2: Proximity => "Condition2",
    bldg_type: BldgType => "BldgType",
    house_style: HouseStyle => "HouseStyle",
    overall_qual: i64 => "OverallQual",
    overall_cond: i64 => "OverallCond",
    year_built: i64 => "YearBuilt",
    year_remod_add: i64 => "YearRemodAdd",
    roof_style: RoofStyle => "RoofStyle",
    roof_matl: RoofMatl => "RoofMatl",
    exterior1st: Exterior => "Exterior1st",
    exterior2nd: Exterior => "Exterior2nd",
    mas_vnr_type: MasVnrType => "MasVnrType",
    mas_vnr_area: i64 => "MasVnrArea",
    exter_qual: Grade => "ExterQual",
    exter_cond: Grade => "ExterCond",
    foundation: Foundation => "Foundation",
    bsmt_qual: Grade => "BsmtQual",
    bsmt_cond: Grade => "BsmtCond",
    bsmt_exposure: BsmtExposure => "BsmtExposure",
    bsmt_fin_type1: BsmtFinType => "BsmtFinType1",
    bsmt_fin_sf1: i64 => "BsmtFinSF1",
    bsmt_fin_type2: BsmtFinType => "BsmtFinType2",
    bsmt_fin_sf2: i64 => "BsmtFinSF2",
    bsmt_unf_sf: i64 => "BsmtUnfSF",
    total_bsmt_sf: i64 => "TotalBsmtSF",
    heating: Heating => "Heating",
    heating_qc: Grade => "HeatingQC",
    central_air: CentralAir => "CentralAir",
    electrical: Electrical => "Electrical",
    first_flr_sf: i64 => "1stFlrSF",
    second_flr_sf: i64 => "2ndFlrSF",
    low_qual_fin_sf: i64 => "LowQualFinSF",
    gr_liv_area: i64 => "GrLivArea",
    bsmt_full_bath: i64 => "BsmtFullBath",
    bsmt_half_bath: i64 => "BsmtHalfBath",
    full_bath: i64 => "FullBath",
    half_bath: i64 => "HalfBath",
    bedroom_abv_gr: i64 => "BedroomAbvGr",
    kitchen_abv_gr: i64 => "KitchenAbvGr",
    kitchen_qual: Grade => "KitchenQual",
    tot_rms_abv_grd: i64 => "TotRmsAbvGrd",
    functional: Functional => "Functional",
    fireplaces: i64 => "Fireplaces",
    fireplace_qu: Grade => "FireplaceQu",
    garage_type: GarageType => "GarageType",
    garage_yr_blt: i64 => "GarageYrBlt",
    garage_finish: GarageFinish => "GarageFinish",
    garage_cars: i64 => "GarageCars",
    garage_area: i64 => "GarageArea",
    garage_qual: Grade => "GarageQual",
    garage_cond: Grade => "GarageCond",
    paved_drive: PavedDrive => "PavedDrive",
    wood_deck_sf: i64 => "WoodDeckSF",
    open_porch_sf: i64 => "OpenPorchSF",
    enclosed_porch: i64 => "EnclosedPorch",
    three_ssn_porch: i64 => "3SsnPorch",
    screen_porch: i64 => "ScreenPorch",
    pool_area: i64 => "PoolArea",
    pool_qc: Grade => "PoolQC",
    fence: Fence => "Fence",
    misc_feature: MiscFeature => "MiscFeature",
    misc_val: i64 => "MiscVal",
    mo_sold: i64 => "MoSold",
    yr_sold: i64 => "YrSold",
    sale_type: SaleType => "SaleType",
    sale_condition: SaleCondition => "SaleCondition",
}

impl ModelFeatureRecord {
    /// Every column with its value, in dataset order.
    pub fn values(&self) -> Vec<(&'static str, FeatureValue)> {
        COLUMNS
            .iter()
            .filter_map(|column| self.value(column).map(|v| (*column, v)))
            .collect()
    }

    /// A complete row from the Ames test set (Id 1461), used when a caller
    /// asks for a prediction without supplying any data.
    pub fn reference() -> Self {
        ModelFeatureRecord {
            ms_sub_class: 20,
            ms_zoning: MsZoning::RH,
            lot_frontage: 80,
            lot_area: 11622,
            street: Street::Pave,
            alley: Alley::NA,
            lot_shape: LotShape::Reg,
            land_contour: LandContour::Lvl,
            utilities: Utilities::AllPub,
            lot_config: LotConfig::Inside,
            land_slope: LandSlope::Gtl,
            neighborhood: Neighborhood::NAmes,
            condition1: Proximity::Feedr,
            condition2: Proximity::Norm,
            bldg_type: BldgType::OneFam,
            house_style: HouseStyle::OneStory,
            overall_qual: 5,
            overall_cond: 6,
            year_built: 1961,
            year_remod_add: 1961,
            roof_style: RoofStyle::Gable,
            roof_matl: RoofMatl::CompShg,
            exterior1st: Exterior::VinylSd,
            exterior2nd: Exterior::VinylSd,
            mas_vnr_type: MasVnrType::NoVeneer,
            mas_vnr_area: 0,
            exter_qual: Grade::TA,
            exter_cond: Grade::TA,
            foundation: Foundation::CBlock,
            bsmt_qual: Grade::TA,
            bsmt_cond: Grade::TA,
            bsmt_exposure: BsmtExposure::No,
            bsmt_fin_type1: BsmtFinType::Rec,
            bsmt_fin_sf1: 468,
            bsmt_fin_type2: BsmtFinType::LwQ,
            bsmt_fin_sf2: 144,
            bsmt_unf_sf: 270,
            total_bsmt_sf: 882,
            heating: Heating::GasA,
            heating_qc: Grade::TA,
            central_air: CentralAir::Y,
            electrical: Electrical::SBrkr,
            first_flr_sf: 896,
            second_flr_sf: 0,
            low_qual_fin_sf: 0,
            gr_liv_area: 896,
            bsmt_full_bath: 0,
            bsmt_half_bath: 0,
            full_bath: 1,
            half_bath: 0,
            bedroom_abv_gr: 2,
            kitchen_abv_gr: 1,
            kitchen_qual: Grade::TA,
            tot_rms_abv_grd: 5,
            functional: Functional::Typ,
            fireplaces: 0,
            fireplace_qu: Grade::NA,
            garage_type: GarageType::Attchd,
            garage_yr_blt: 1961,
            garage_finish: GarageFinish::Unf,
            garage_cars: 1,
            garage_area: 730,
            garage_qual: Grade::TA,
            garage_cond: Grade::TA,
            paved_drive: PavedDrive::Y,
            wood_deck_sf: 140,
            open_porch_sf: 0,
            enclosed_porch: 0,
            three_ssn_porch: 0,
            screen_porch: 120,
            pool_area: 0,
            pool_qc: Grade::NA,
            fence: Fence::MnPrv,
            misc_feature: MiscFeature::NA,
            misc_val: 0,
            mo_sold: 6,
            yr_sold: 2010,
            sale_type: SaleType::WD,
            sale_condition: SaleCondition::Normal,
        }
    }
}
