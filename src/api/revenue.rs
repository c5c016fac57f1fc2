//! Revenue aggregation endpoints
//!
//! Raw aggregates for chart consumers and the advisory reconciliation
//! check. The chat endpoint uses the same service layer internally.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;

use super::parse_date_param;

/// One day of the aggregation breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyRevenue {
    /// Business day
    pub date: NaiveDate,
    /// Revenue for the day (authoritative ledger figure)
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    /// Number of sales checks
    pub check_count: i32,
    /// Weekday name (e.g. "Friday")
    pub day_of_week: String,
}

/// Aggregated revenue over an inclusive date range.
///
/// `day_count` counts ledger rows found, `calendar_days` counts days in
/// the range; the difference flags missing-data gaps. A day present in
/// the ledger with zero revenue counts toward `day_count`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AggregationResult {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Sum of daily revenue over rows found
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    /// Sum of check counts over rows found
    pub total_checks: i64,
    /// Average check size (0 when there are no checks)
    #[schema(value_type = f64)]
    pub average_check: Decimal,
    /// Ledger rows found in the range
    pub day_count: i64,
    /// Calendar days in the range, inclusive
    pub calendar_days: i64,
    /// True when the ledger has no rows at all for the range
    pub no_data_found: bool,
    /// Per-day figures, date ascending
    pub daily_breakdown: Vec<DailyRevenue>,
    /// Highest-revenue day, when any rows exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_day: Option<DailyRevenue>,
    /// Lowest-revenue day, when any rows exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_day: Option<DailyRevenue>,
}

/// Deltas between two aggregated periods (current minus previous).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodComparison {
    #[schema(value_type = f64)]
    pub revenue_delta: Decimal,
    pub check_delta: i64,
    #[schema(value_type = f64)]
    pub avg_check_delta: Decimal,
    /// Revenue change as a percentage of the previous period; absent
    /// when the previous period had no revenue
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub revenue_change_percent: Option<Decimal>,
}

/// Ledger-vs-raw-checks reconciliation report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Total from the revenue ledger
    #[schema(value_type = f64)]
    pub ledger_total: Decimal,
    /// Total independently computed from the raw check table
    #[schema(value_type = f64)]
    pub secondary_total: Decimal,
    /// Number of non-voided checks in the secondary source
    pub secondary_check_count: i64,
    /// Absolute difference between the two totals
    #[schema(value_type = f64)]
    pub discrepancy: Decimal,
    /// True when the totals agree within rounding tolerance
    pub matches: bool,
}

/// Query parameters for ranged revenue endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RevenueQuery {
    /// Start date (YYYY-MM-DD); defaults to 7 days before today
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD); defaults to today
    pub end_date: Option<String>,
}

fn resolve_range(
    query: &RevenueQuery,
    today: NaiveDate,
) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = match &query.start_date {
        Some(s) => parse_date_param(s, "start_date")?,
        None => today - chrono::Duration::days(7),
    };
    let end = match &query.end_date {
        Some(s) => parse_date_param(s, "end_date")?,
        None => today,
    };
    if start > end {
        return Err(crate::error::AppError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok((start, end))
}

/// Get aggregated revenue for a date range
#[utoipa::path(
    get,
    path = "/revenue",
    tag = "revenue",
    params(RevenueQuery),
    responses(
        (status = 200, description = "Aggregated revenue", body = AggregationResult),
        (status = 400, description = "Invalid date parameters")
    )
)]
pub async fn get_revenue(
    State(state): State<crate::AppState>,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<AggregationResult>> {
    let today = state.config.venue.business_today();
    let (start, end) = resolve_range(&query, today)?;

    let result = state.services.aggregator.aggregate(start, end).await?;
    Ok(Json(result))
}

/// Reconcile the ledger against the raw check table
#[utoipa::path(
    get,
    path = "/revenue/reconcile",
    tag = "revenue",
    params(RevenueQuery),
    responses(
        (status = 200, description = "Reconciliation report", body = ReconciliationReport),
        (status = 400, description = "Invalid date parameters")
    )
)]
pub async fn reconcile(
    State(state): State<crate::AppState>,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<ReconciliationReport>> {
    let today = state.config.venue.business_today();
    let (start, end) = resolve_range(&query, today)?;

    let report = state.services.reconciliation.reconcile(start, end).await?;
    Ok(Json(report))
}
