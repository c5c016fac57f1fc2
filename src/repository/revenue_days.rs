//! Revenue ledger repository
//!
//! Read-only access to the per-day revenue ledger. Sync jobs own the
//! writes; nothing here mutates rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::revenue_day::RevenueDay};

#[derive(Clone)]
pub struct RevenueDaysRepository {
    pool: Pool<Postgres>,
}

impl RevenueDaysRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch ledger rows with `date` in `[start, end]` inclusive,
    /// ordered by date ascending.
    ///
    /// Only `actual_revenue` is selected; the legacy `revenue_total`
    /// column stays behind this boundary.
    pub async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<RevenueDay>> {
        let rows = sqlx::query_as::<_, RevenueDay>(
            r#"
            SELECT date, actual_revenue, check_count, notes
            FROM revenue_days
            WHERE date >= $1 AND date <= $2
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Total ledger revenue for a date range, summed in the database.
    pub async fn total(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(actual_revenue), 0) FROM revenue_days WHERE date >= $1 AND date <= $2"
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
