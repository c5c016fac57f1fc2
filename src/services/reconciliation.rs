//! Ledger reconciliation service
//!
//! Advisory drift check between the per-day ledger and the raw POS
//! check table. Read-only and off the request hot path; a mismatch is
//! informational, never an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::{api::revenue::ReconciliationReport, error::AppResult, repository::Repository};

/// Totals within one cent of each other are considered in agreement.
static TOLERANCE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

#[derive(Clone)]
pub struct ReconciliationService {
    repository: Repository,
}

impl ReconciliationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Compare the ledger total against an independently summed total
    /// from the raw check table over the same range.
    pub async fn reconcile(&self, start: NaiveDate, end: NaiveDate) -> AppResult<ReconciliationReport> {
        let (ledger_total, secondary) = tokio::try_join!(
            self.repository.revenue_days.total(start, end),
            self.repository.pos_checks.totals(start, end),
        )?;

        let report = build_report(start, end, ledger_total, secondary.total, secondary.count);
        if !report.matches {
            tracing::warn!(
                start = %start,
                end = %end,
                ledger = %report.ledger_total,
                secondary = %report.secondary_total,
                discrepancy = %report.discrepancy,
                "ledger and raw check totals disagree"
            );
        }
        Ok(report)
    }
}

fn build_report(
    start: NaiveDate,
    end: NaiveDate,
    ledger_total: Decimal,
    secondary_total: Decimal,
    secondary_check_count: i64,
) -> ReconciliationReport {
    let discrepancy = (ledger_total - secondary_total).abs();
    ReconciliationReport {
        period_start: start,
        period_end: end,
        ledger_total,
        secondary_total,
        secondary_check_count,
        discrepancy,
        matches: discrepancy <= *TOLERANCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn exact_agreement_matches() {
        let report = build_report(
            date(2025, 7, 1),
            date(2025, 7, 31),
            dec("31533.21"),
            dec("31533.21"),
            1240,
        );
        assert!(report.matches);
        assert_eq!(report.discrepancy, Decimal::ZERO);
    }

    #[test]
    fn one_cent_difference_is_within_tolerance() {
        let report = build_report(
            date(2025, 8, 1),
            date(2025, 8, 10),
            dec("11955.41"),
            dec("11955.42"),
            460,
        );
        assert!(report.matches);
    }

    #[test]
    fn real_drift_is_reported_not_thrown() {
        let report = build_report(
            date(2025, 8, 1),
            date(2025, 8, 10),
            dec("11955.41"),
            dec("11700.00"),
            450,
        );
        assert!(!report.matches);
        assert_eq!(report.discrepancy, dec("255.41"));
    }

    #[test]
    fn discrepancy_is_absolute() {
        let report = build_report(
            date(2025, 8, 1),
            date(2025, 8, 1),
            dec("100.00"),
            dec("150.00"),
            6,
        );
        assert_eq!(report.discrepancy, dec("50.00"));
    }
}
