// src/features/vocab.rs

//! Closed vocabularies of the categorical dataset columns.
//!
//! Each vocabulary is an enum whose variants carry the dataset code. Codes
//! are matched exactly (after trimming); the extra spellings listed after a
//! code are variants that occur in the published dataset files.

use serde::{Serialize, Serializer};
use std::fmt;

use super::record::{FeatureValue, IntoFeature};

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident (default $default:ident) {
            $( $variant:ident => $code:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn code(self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            pub fn from_code(raw: &str) -> Option<Self> {
                match raw.trim() {
                    $( $code $(| $alias)* => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl IntoFeature for $name {
            fn to_feature(&self) -> FeatureValue {
                FeatureValue::Code(self.code())
            }
        }
    };
}

vocabulary! {
    /// Quality/condition letter grade shared by every *Qual, *Cond and *QC column.
    Grade (default TA) {
        Ex => "Ex",
        Gd => "Gd",
        TA => "TA",
        Fa => "Fa",
        Po => "Po",
        NA => "NA",
    }
}

vocabulary! {
    MsZoning (default RL) {
        A => "A",
        C => "C (all)" | "C",
        FV => "FV",
        I => "I",
        RH => "RH",
        RL => "RL",
        RP => "RP",
        RM => "RM",
    }
}

vocabulary! {
    Street (default Pave) {
        Grvl => "Grvl",
        Pave => "Pave",
    }
}

vocabulary! {
    Alley (default NA) {
        Grvl => "Grvl",
        Pave => "Pave",
        NA => "NA",
    }
}

vocabulary! {
    LotShape (default Reg) {
        Reg => "Reg",
        IR1 => "IR1",
        IR2 => "IR2",
        IR3 => "IR3",
    }
}

vocabulary! {
    LandContour (default Lvl) {
        Lvl => "Lvl",
        Bnk => "Bnk",
        HLS => "HLS",
        Low => "Low",
    }
}

vocabulary! {
    Utilities (default AllPub) {
        AllPub => "AllPub",
        NoSewr => "NoSewr",
        NoSeWa => "NoSeWa",
        ELO => "ELO",
    }
}

vocabulary! {
    LotConfig (default Inside) {
        Inside => "Inside",
        Corner => "Corner",
        CulDSac => "CulDSac",
        FR2 => "FR2",
        FR3 => "FR3",
    }
}

vocabulary! {
    LandSlope (default Gtl) {
        Gtl => "Gtl",
        Mod => "Mod",
        Sev => "Sev",
    }
}

vocabulary! {
    Neighborhood (default NAmes) {
        Blmngtn => "Blmngtn",
        Blueste => "Blueste",
        BrDale => "BrDale",
        BrkSide => "BrkSide",
        ClearCr => "ClearCr",
        CollgCr => "CollgCr",
        Crawfor => "Crawfor",
        Edwards => "Edwards",
        Gilbert => "Gilbert",
        IDOTRR => "IDOTRR",
        MeadowV => "MeadowV",
        Mitchel => "Mitchel",
        NAmes => "NAmes" | "Names",
        NoRidge => "NoRidge",
        NPkVill => "NPkVill",
        NridgHt => "NridgHt",
        NWAmes => "NWAmes",
        OldTown => "OldTown",
        SWISU => "SWISU",
        Sawyer => "Sawyer",
        SawyerW => "SawyerW",
        Somerst => "Somerst",
        StoneBr => "StoneBr",
        Timber => "Timber",
        Veenker => "Veenker",
    }
}

const NEIGHBORHOOD_NAMES: &[(Neighborhood, &str)] = &[
    (Neighborhood::Blmngtn, "Bloomington Heights"),
    (Neighborhood::Blueste, "Bluestem"),
    (Neighborhood::BrDale, "Briardale"),
    (Neighborhood::BrkSide, "Brookside"),
    (Neighborhood::ClearCr, "Clear Creek"),
    (Neighborhood::CollgCr, "College Creek"),
    (Neighborhood::Crawfor, "Crawford"),
    (Neighborhood::Edwards, "Edwards"),
    (Neighborhood::Gilbert, "Gilbert"),
    (Neighborhood::IDOTRR, "Iowa DOT and Rail Road"),
    (Neighborhood::MeadowV, "Meadow Village"),
    (Neighborhood::Mitchel, "Mitchell"),
    (Neighborhood::NAmes, "North Ames"),
    (Neighborhood::NoRidge, "Northridge"),
    (Neighborhood::NPkVill, "Northpark Villa"),
    (Neighborhood::NridgHt, "Northridge Heights"),
    (Neighborhood::NWAmes, "Northwest Ames"),
    (Neighborhood::OldTown, "Old Town"),
    (Neighborhood::SWISU, "South & West of Iowa State University"),
    (Neighborhood::Sawyer, "Sawyer"),
    (Neighborhood::SawyerW, "Sawyer West"),
    (Neighborhood::Somerst, "Somerset"),
    (Neighborhood::StoneBr, "Stone Brook"),
    (Neighborhood::Timber, "Timberland"),
    (Neighborhood::Veenker, "Veenker"),
];

impl Neighborhood {
    /// Resolve a user-supplied neighborhood: dataset code first, then the
    /// display name (case-insensitive). Anything else is `None`.
    pub fn resolve(raw: &str) -> Option<Self> {
        if let Some(n) = Self::from_code(raw) {
            return Some(n);
        }
        let wanted = raw.trim();
        NEIGHBORHOOD_NAMES
            .iter()
            .find(|(code, name)| {
                name.eq_ignore_ascii_case(wanted) || code.code().eq_ignore_ascii_case(wanted)
            })
            .map(|(code, _)| *code)
    }

    pub fn display_name(self) -> &'static str {
        NEIGHBORHOOD_NAMES
            .iter()
            .find(|(code, _)| *code == self)
            .map(|(_, name)| *name)
            .unwrap_or_else(|| self.code())
    }
}

vocabulary! {
    /// Proximity to roads and railroads (Condition1 and Condition2).
    Proximity (default Norm) {
        Artery => "Artery",
        Feedr => "Feedr",
        Norm => "Norm",
        RRNn => "RRNn",
        RRAn => "RRAn",
        PosN => "PosN",
        PosA => "PosA",
        RRNe => "RRNe",
        RRAe => "RRAe",
    }
}

vocabulary! {
    BldgType (default OneFam) {
        OneFam => "1Fam",
        TwoFmCon => "2fmCon" | "2FmCon",
        Duplex => "Duplex" | "Duplx",
        TwnhsE => "TwnhsE",
        Twnhs => "Twnhs" | "TwnhsI",
    }
}

vocabulary! {
    HouseStyle (default OneStory) {
        OneStory => "1Story",
        OneHalfFin => "1.5Fin",
        OneHalfUnf => "1.5Unf",
        TwoStory => "2Story",
        TwoHalfFin => "2.5Fin",
        TwoHalfUnf => "2.5Unf",
        SFoyer => "SFoyer",
        SLvl => "SLvl",
    }
}

vocabulary! {
    RoofStyle (default Gable) {
        Flat => "Flat",
        Gable => "Gable",
        Gambrel => "Gambrel",
        Hip => "Hip",
        Mansard => "Mansard",
        Shed => "Shed",
    }
}

vocabulary! {
    RoofMatl (default CompShg) {
        ClyTile => "ClyTile",
        CompShg => "CompShg",
        Membran => "Membran",
        Metal => "Metal",
        Roll => "Roll",
        TarGrv => "Tar&Grv",
        WdShake => "WdShake",
        WdShngl => "WdShngl",
    }
}

vocabulary! {
    /// Exterior covering (Exterior1st and Exterior2nd).
    Exterior (default VinylSd) {
        AsbShng => "AsbShng",
        AsphShn => "AsphShn",
        BrkComm => "BrkComm" | "Brk Cmn",
        BrkFace => "BrkFace",
        CBlock => "CBlock",
        CemntBd => "CemntBd" | "CmentBd",
        HdBoard => "HdBoard",
        ImStucc => "ImStucc",
        MetalSd => "MetalSd",
        Other => "Other",
        Plywood => "Plywood",
        PreCast => "PreCast",
        Stone => "Stone",
        Stucco => "Stucco",
        VinylSd => "VinylSd",
        WdSdng => "Wd Sdng",
        WdShing => "WdShing" | "Wd Shng",
    }
}

vocabulary! {
    MasVnrType (default NoVeneer) {
        BrkCmn => "BrkCmn",
        BrkFace => "BrkFace",
        CBlock => "CBlock",
        NoVeneer => "None" | "NA",
        Stone => "Stone",
    }
}

vocabulary! {
    Foundation (default PConc) {
        BrkTil => "BrkTil",
        CBlock => "CBlock",
        PConc => "PConc",
        Slab => "Slab",
        Stone => "Stone",
        Wood => "Wood",
    }
}

vocabulary! {
    BsmtExposure (default No) {
        Gd => "Gd",
        Av => "Av",
        Mn => "Mn",
        No => "No",
        NA => "NA",
    }
}

vocabulary! {
    /// Basement finished-area rating (BsmtFinType1 and BsmtFinType2).
    BsmtFinType (default Unf) {
        GLQ => "GLQ",
        ALQ => "ALQ",
        BLQ => "BLQ",
        Rec => "Rec",
        LwQ => "LwQ",
        Unf => "Unf",
        NA => "NA",
    }
}

vocabulary! {
    Heating (default GasA) {
        Floor => "Floor",
        GasA => "GasA",
        GasW => "GasW",
        Grav => "Grav",
        OthW => "OthW",
        Wall => "Wall",
    }
}

vocabulary! {
    CentralAir (default Y) {
        Y => "Y",
        N => "N",
    }
}

vocabulary! {
    Electrical (default SBrkr) {
        SBrkr => "SBrkr",
        FuseA => "FuseA",
        FuseF => "FuseF",
        FuseP => "FuseP",
        Mix => "Mix",
    }
}

vocabulary! {
    Functional (default Typ) {
        Typ => "Typ",
        Min1 => "Min1",
        Min2 => "Min2",
        Mod => "Mod",
        Maj1 => "Maj1",
        Maj2 => "Maj2",
        Sev => "Sev",
        Sal => "Sal",
    }
}

vocabulary! {
    GarageType (default Attchd) {
        TwoTypes => "2Types",
        Attchd => "Attchd",
        Basment => "Basment",
        BuiltIn => "BuiltIn",
        CarPort => "CarPort",
        Detchd => "Detchd",
        NA => "NA",
    }
}

vocabulary! {
    GarageFinish (default Fin) {
        Fin => "Fin",
        RFn => "RFn",
        Unf => "Unf",
        NA => "NA",
    }
}

vocabulary! {
    PavedDrive (default Y) {
        Y => "Y",
        P => "P",
        N => "N",
    }
}

vocabulary! {
    Fence (default NA) {
        GdPrv => "GdPrv",
        MnPrv => "MnPrv",
        GdWo => "GdWo",
        MnWw => "MnWw",
        NA => "NA",
    }
}

vocabulary! {
    MiscFeature (default NA) {
        Elev => "Elev",
        Gar2 => "Gar2",
        Othr => "Othr",
        Shed => "Shed",
        TenC => "TenC",
        NA => "NA",
    }
}

vocabulary! {
    SaleType (default WD) {
        WD => "WD",
        CWD => "CWD",
        VWD => "VWD",
        New => "New",
        COD => "COD",
        Con => "Con",
        ConLw => "ConLw",
        ConLI => "ConLI",
        ConLD => "ConLD",
        Oth => "Oth",
    }
}

vocabulary! {
    SaleCondition (default Normal) {
        Normal => "Normal",
        Abnorml => "Abnorml",
        AdjLand => "AdjLand",
        Alloca => "Alloca",
        Family => "Family",
        Partial => "Partial",
    }
}
