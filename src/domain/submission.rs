// src/domain/submission.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::features::PropertyForm;

/// Placeholder confidence stored with every prediction until the model
/// artifact carries a real uncertainty estimate.
pub const PREDICTION_CONFIDENCE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 3] = [
        VerificationStatus::Pending,
        VerificationStatus::Verified,
        VerificationStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(VerificationStatus::Pending),
            "verified" => Some(VerificationStatus::Verified),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }

    /// Status named by an admin action path segment.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "verify" => Some(VerificationStatus::Verified),
            "pending" => Some(VerificationStatus::Pending),
            "reject" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }
}

/// Body of `POST /api/submissions`: the property form plus who sent it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionForm {
    #[serde(flatten)]
    pub property: PropertyForm,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub description: Option<String>,
    /// Known sale price, when the submitter has one.
    pub sale_price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: i64,
    pub submitted_at: NaiveDateTime,
    pub status: VerificationStatus,
    pub form: SubmissionForm,
    pub predicted_price: Option<f64>,
    pub prediction_confidence: Option<f64>,
    pub predicted_at: Option<NaiveDateTime>,
}

impl Submission {
    pub fn full_address(&self) -> String {
        let p = &self.form.property;
        let part = |s: &Option<String>| s.clone().unwrap_or_default();
        format!(
            "{}, {}, {} {}",
            part(&p.address),
            part(&p.city),
            part(&p.state),
            part(&p.zip_code)
        )
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
    }
}
