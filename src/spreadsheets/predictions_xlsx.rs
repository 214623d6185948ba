use crate::domain::PredictionRow;
use crate::errors::ServerError;
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 7] = [
    "Id",
    "Bedrooms",
    "Full Baths",
    "Living Area (sqft)",
    "Neighborhood",
    "Year Built",
    "Predicted Price",
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Workbook bytes with one row per prediction, in input order.
pub fn predictions_workbook(rows: &[PredictionRow]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err(header))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_number(r, 0, row.id as f64)
            .map_err(xlsx_err("id"))?;
        worksheet
            .write_number(r, 1, row.bedrooms as f64)
            .map_err(xlsx_err("bedrooms"))?;
        worksheet
            .write_number(r, 2, row.bathrooms as f64)
            .map_err(xlsx_err("bathrooms"))?;
        worksheet
            .write_number(r, 3, row.sqft_living as f64)
            .map_err(xlsx_err("living area"))?;
        worksheet
            .write_string(r, 4, &row.neighborhood)
            .map_err(xlsx_err("neighborhood"))?;
        worksheet
            .write_number(r, 5, row.year_built as f64)
            .map_err(xlsx_err("year built"))?;
        worksheet
            .write_number_with_format(r, 6, row.predicted_price, &money)
            .map_err(xlsx_err("price"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_predictions_xlsx(rows: &[PredictionRow]) -> ResultResp {
    let buffer = predictions_workbook(rows)?;
    xlsx_response(buffer, "price_predictions.xlsx")
}
