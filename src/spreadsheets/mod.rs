pub mod predictions_xlsx;

pub use predictions_xlsx::{export_predictions_xlsx, predictions_workbook};
