//! Revenue ledger model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One day of the revenue ledger.
///
/// Rows are written by external sync jobs (upsert keyed by `date`) and are
/// read-only here. The underlying table also carries a legacy
/// `revenue_total` column kept for migration compatibility; it is absorbed
/// at this boundary and never exposed, so aggregations can only ever sum
/// `actual_revenue`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RevenueDay {
    /// Business day the revenue is attributed to (unique)
    pub date: NaiveDate,
    /// Authoritative revenue figure for the day
    #[schema(value_type = f64)]
    pub actual_revenue: Decimal,
    /// Number of distinct sales checks that day
    pub check_count: i32,
    /// Provenance/audit text (e.g. "synced from POS on ...", "verified")
    pub notes: Option<String>,
}
