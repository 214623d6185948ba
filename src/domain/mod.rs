pub mod estimate;
pub mod submission;

pub use estimate::{attach_metadata, BatchSummary, PredictionRow};
pub use submission::{Submission, SubmissionForm, VerificationStatus, PREDICTION_CONFIDENCE};
