// src/db/insights.rs
use crate::errors::ServerError;
use rusqlite::Connection;
use serde::Serialize;

/// Aggregates over every stored submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketInsights {
    pub total_submissions: i64,
    pub pending: i64,
    pub verified: i64,
    pub rejected: i64,
    pub priced: i64,
    pub average_predicted_price: Option<f64>,
    pub min_predicted_price: Option<f64>,
    pub max_predicted_price: Option<f64>,
    /// Mean |predicted - sale| over submissions that carry both.
    pub mean_absolute_error: Option<f64>,
    pub compared_sales: i64,
}

pub fn market_insights(conn: &Connection) -> Result<MarketInsights, ServerError> {
    conn.query_row(
        r#"
        select
            count(*),
            coalesce(sum(status = 'pending'), 0),
            coalesce(sum(status = 'verified'), 0),
            coalesce(sum(status = 'rejected'), 0),
            count(predicted_price),
            avg(predicted_price),
            min(predicted_price),
            max(predicted_price),
            avg(case when sale_price is not null and predicted_price is not null
                     then abs(predicted_price - sale_price) end),
            count(case when sale_price is not null and predicted_price is not null
                       then 1 end)
        from submissions
        "#,
        [],
        |row| {
            Ok(MarketInsights {
                total_submissions: row.get(0)?,
                pending: row.get(1)?,
                verified: row.get(2)?,
                rejected: row.get(3)?,
                priced: row.get(4)?,
                average_predicted_price: row.get(5)?,
                min_predicted_price: row.get(6)?,
                max_predicted_price: row.get(7)?,
                mean_absolute_error: row.get(8)?,
                compared_sales: row.get(9)?,
            })
        },
    )
    .map_err(|e| ServerError::DbError(format!("failed to aggregate submissions: {e}")))
}
