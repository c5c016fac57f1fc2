//! Raw POS check repository
//!
//! Secondary revenue source used only by the reconciliation check. The
//! `pos_checks` table holds individual sales checks as synced from the
//! POS provider; voided checks are excluded from totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::error::AppResult;

/// Independently computed totals from the raw check table.
#[derive(Debug, Clone)]
pub struct PosCheckTotals {
    pub total: Decimal,
    pub count: i64,
}

#[derive(Clone)]
pub struct PosChecksRepository {
    pool: Pool<Postgres>,
}

impl PosChecksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Sum check amounts and count checks for a business-date range.
    pub async fn totals(&self, start: NaiveDate, end: NaiveDate) -> AppResult<PosCheckTotals> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(total_amount), 0) AS total, COUNT(*) AS count
            FROM pos_checks
            WHERE business_date >= $1 AND business_date <= $2 AND NOT voided
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(PosCheckTotals {
            total: row.get("total"),
            count: row.get("count"),
        })
    }
}
