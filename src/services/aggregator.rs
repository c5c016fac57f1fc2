//! Revenue aggregation service
//!
//! Turns ledger rows into the per-range aggregates the chat context and
//! chart endpoints consume. The math is a pure function over fetched
//! rows so it can be tested without a database; the service wraps it
//! with repository reads.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    api::revenue::{AggregationResult, DailyRevenue, PeriodComparison},
    error::AppResult,
    nlq::ParsedDateRange,
    repository::Repository,
};

/// Width of the fallback window used when no date phrase matched.
const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AggregatorService {
    repository: Repository,
}

impl AggregatorService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Aggregate ledger revenue over `[start, end]` inclusive.
    ///
    /// An empty ledger range is not an error: the result comes back
    /// with zero totals and `no_data_found` set so callers can phrase
    /// "no data available" instead of failing.
    pub async fn aggregate(&self, start: NaiveDate, end: NaiveDate) -> AppResult<AggregationResult> {
        let rows = self.repository.revenue_days.fetch_range(start, end).await?;
        Ok(aggregate_rows(start, end, &rows))
    }

    /// Aggregate two periods and compute current-minus-previous deltas.
    /// The ranges are disjoint reads, so both run concurrently.
    pub async fn compare(
        &self,
        current: &ParsedDateRange,
        previous: &ParsedDateRange,
    ) -> AppResult<(AggregationResult, AggregationResult, PeriodComparison)> {
        let (cur, prev) = tokio::try_join!(
            self.aggregate(current.start, current.end),
            self.aggregate(previous.start, previous.end),
        )?;
        let deltas = compare_periods(&cur, &prev);
        Ok((cur, prev, deltas))
    }

    /// Fallback window when the message carried no recognizable date
    /// phrase: the last 7 days ending today.
    pub fn default_range(&self, today: NaiveDate) -> ParsedDateRange {
        ParsedDateRange {
            start: today - Duration::days(DEFAULT_WINDOW_DAYS),
            end: today,
            label: format!("last {} days", DEFAULT_WINDOW_DAYS),
        }
    }
}

/// Pure aggregation over already-fetched rows (date ascending).
///
/// `total_revenue` sums `actual_revenue` and nothing else. `day_count`
/// counts rows found; a ledger row with zero revenue (a slow Monday)
/// still counts, while a day absent from the ledger does not, so the
/// gap against `calendar_days` flags missing data.
pub fn aggregate_rows(
    start: NaiveDate,
    end: NaiveDate,
    rows: &[crate::models::RevenueDay],
) -> AggregationResult {
    let daily_breakdown: Vec<DailyRevenue> = rows
        .iter()
        .map(|row| DailyRevenue {
            date: row.date,
            revenue: row.actual_revenue,
            check_count: row.check_count,
            day_of_week: row.date.format("%A").to_string(),
        })
        .collect();

    let total_revenue: Decimal = daily_breakdown.iter().map(|d| d.revenue).sum();
    let total_checks: i64 = daily_breakdown.iter().map(|d| d.check_count as i64).sum();
    let average_check = if total_checks > 0 {
        (total_revenue / Decimal::from(total_checks)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let best_day = daily_breakdown
        .iter()
        .max_by_key(|d| d.revenue)
        .cloned();
    let worst_day = daily_breakdown
        .iter()
        .min_by_key(|d| d.revenue)
        .cloned();

    AggregationResult {
        period_start: start,
        period_end: end,
        total_revenue,
        total_checks,
        average_check,
        day_count: daily_breakdown.len() as i64,
        calendar_days: (end - start).num_days() + 1,
        no_data_found: daily_breakdown.is_empty(),
        daily_breakdown,
        best_day,
        worst_day,
    }
}

/// Current-minus-previous deltas between two aggregated periods.
/// The percent change is absent when the previous period had no
/// revenue, since dividing by zero says nothing useful.
pub fn compare_periods(current: &AggregationResult, previous: &AggregationResult) -> PeriodComparison {
    let revenue_delta = current.total_revenue - previous.total_revenue;
    let revenue_change_percent = if previous.total_revenue > Decimal::ZERO {
        Some((revenue_delta / previous.total_revenue * Decimal::from(100)).round_dp(1))
    } else {
        None
    };

    PeriodComparison {
        revenue_delta,
        check_delta: current.total_checks - previous.total_checks,
        avg_check_delta: current.average_check - previous.average_check,
        revenue_change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RevenueDay;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn row(d: NaiveDate, revenue: &str, checks: i32) -> RevenueDay {
        RevenueDay {
            date: d,
            actual_revenue: dec(revenue),
            check_count: checks,
            notes: None,
        }
    }

    /// A full July 2025: 31 rows whose revenues sum to exactly 31533.21.
    fn full_july() -> Vec<RevenueDay> {
        let mut rows: Vec<RevenueDay> = (1..=31)
            .map(|d| row(date(2025, 7, d), "1017.20", 40))
            .collect();
        // 31 * 1017.20 = 31533.20; bump the last day by a cent.
        rows[30].actual_revenue = dec("1017.21");
        rows
    }

    #[test]
    fn full_month_totals_match_the_ledger() {
        let rows = full_july();
        let result = aggregate_rows(date(2025, 7, 1), date(2025, 7, 31), &rows);
        assert_eq!(result.total_revenue, dec("31533.21"));
        assert_eq!(result.day_count, 31);
        assert_eq!(result.calendar_days, 31);
        assert!(!result.no_data_found);
    }

    #[test]
    fn partial_month_reports_rows_found_not_calendar_days() {
        // Only 6 days of August have ledger rows, summing to 11955.41.
        let rows = vec![
            row(date(2025, 8, 1), "2100.00", 80),
            row(date(2025, 8, 2), "2455.41", 95),
            row(date(2025, 8, 3), "1800.00", 70),
            row(date(2025, 8, 8), "1900.00", 72),
            row(date(2025, 8, 9), "2200.00", 85),
            row(date(2025, 8, 10), "1500.00", 60),
        ];
        let result = aggregate_rows(date(2025, 8, 1), date(2025, 8, 31), &rows);
        assert_eq!(result.total_revenue, dec("11955.41"));
        assert_eq!(result.day_count, 6);
        assert_eq!(result.calendar_days, 31);
        assert!(!result.no_data_found);
    }

    #[test]
    fn empty_range_is_flagged_not_an_error() {
        let result = aggregate_rows(date(2025, 9, 1), date(2025, 9, 7), &[]);
        assert_eq!(result.total_revenue, Decimal::ZERO);
        assert_eq!(result.day_count, 0);
        assert!(result.no_data_found);
        assert_eq!(result.average_check, Decimal::ZERO);
        assert!(result.best_day.is_none());
    }

    #[test]
    fn zero_revenue_day_counts_as_a_row() {
        // Closed Monday: present in the ledger with zero revenue.
        let rows = vec![
            row(date(2025, 8, 3), "1800.00", 70),
            row(date(2025, 8, 4), "0.00", 0),
            row(date(2025, 8, 5), "1600.00", 65),
        ];
        let result = aggregate_rows(date(2025, 8, 3), date(2025, 8, 5), &rows);
        assert_eq!(result.day_count, 3);
        assert!(!result.no_data_found);
        assert_eq!(result.worst_day.as_ref().unwrap().date, date(2025, 8, 4));
    }

    #[test]
    fn average_check_is_total_over_checks() {
        let rows = vec![
            row(date(2025, 8, 1), "1000.00", 40),
            row(date(2025, 8, 2), "500.00", 10),
        ];
        let result = aggregate_rows(date(2025, 8, 1), date(2025, 8, 2), &rows);
        assert_eq!(result.total_checks, 50);
        assert_eq!(result.average_check, dec("30.00"));
    }

    #[test]
    fn breakdown_carries_weekday_names() {
        let rows = vec![row(date(2025, 8, 8), "1900.00", 72)];
        let result = aggregate_rows(date(2025, 8, 8), date(2025, 8, 8), &rows);
        assert_eq!(result.daily_breakdown[0].day_of_week, "Friday");
    }

    #[test]
    fn best_and_worst_days() {
        let rows = vec![
            row(date(2025, 8, 1), "2100.00", 80),
            row(date(2025, 8, 2), "2455.41", 95),
            row(date(2025, 8, 3), "1800.00", 70),
        ];
        let result = aggregate_rows(date(2025, 8, 1), date(2025, 8, 3), &rows);
        assert_eq!(result.best_day.as_ref().unwrap().date, date(2025, 8, 2));
        assert_eq!(result.worst_day.as_ref().unwrap().date, date(2025, 8, 3));
    }

    #[test]
    fn comparison_deltas_are_current_minus_previous() {
        let current = aggregate_rows(
            date(2025, 8, 10),
            date(2025, 8, 11),
            &[
                row(date(2025, 8, 10), "1200.00", 40),
                row(date(2025, 8, 11), "800.00", 30),
            ],
        );
        let previous = aggregate_rows(
            date(2025, 8, 3),
            date(2025, 8, 4),
            &[
                row(date(2025, 8, 3), "900.00", 35),
                row(date(2025, 8, 4), "700.00", 25),
            ],
        );
        let deltas = compare_periods(&current, &previous);
        assert_eq!(deltas.revenue_delta, dec("400.00"));
        assert_eq!(deltas.check_delta, 10);
        assert_eq!(deltas.revenue_change_percent, Some(dec("25.0")));
    }

    #[test]
    fn comparison_against_empty_previous_has_no_percent() {
        let current = aggregate_rows(
            date(2025, 8, 10),
            date(2025, 8, 10),
            &[row(date(2025, 8, 10), "1200.00", 40)],
        );
        let previous = aggregate_rows(date(2025, 8, 3), date(2025, 8, 3), &[]);
        let deltas = compare_periods(&current, &previous);
        assert_eq!(deltas.revenue_delta, dec("1200.00"));
        assert!(deltas.revenue_change_percent.is_none());
    }
}
