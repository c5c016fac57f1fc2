//! Chat context formatter
//!
//! Assembles parser, classifier and aggregator output into the payload
//! the LLM client and chart consumers share: a structured context
//! object, a plain-text prompt block, and chart visualization entries.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    api::revenue::{AggregationResult, PeriodComparison},
    config::VenueConfig,
    nlq::{ParsedDateRange, QueryType},
};

/// Structured context handed to the LLM and echoed back to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatContext {
    /// Venue display name
    pub venue_name: String,
    /// Venue category (e.g. "Restaurant & Bar")
    pub venue_type: String,
    pub query_type: QueryType,
    /// Resolved range the aggregation ran over
    pub range: ParsedDateRange,
    /// False when the range is the fallback window rather than a
    /// phrase parsed from the message
    pub range_was_parsed: bool,
    pub aggregation: AggregationResult,
    /// Previous-period aggregate, when the message asked for a comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<AggregationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<PeriodComparison>,
}

/// One chart entry for the dashboard, mirroring what the frontend
/// chart components expect.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Visualization {
    /// Chart kind: "line", "bar" or "comparison"
    #[serde(rename = "type")]
    pub chart_type: String,
    pub title: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
}

#[derive(Clone)]
pub struct ContextBuilder {
    venue: VenueConfig,
}

impl ContextBuilder {
    pub fn new(venue: VenueConfig) -> Self {
        Self { venue }
    }

    pub fn build(
        &self,
        query_type: QueryType,
        range: ParsedDateRange,
        range_was_parsed: bool,
        aggregation: AggregationResult,
        previous: Option<AggregationResult>,
        comparison: Option<PeriodComparison>,
    ) -> ChatContext {
        ChatContext {
            venue_name: self.venue.name.clone(),
            venue_type: self.venue.venue_type.clone(),
            query_type,
            range,
            range_was_parsed,
            aggregation,
            previous,
            comparison,
        }
    }
}

impl ChatContext {
    /// Render the plain-text context block prepended to the user's
    /// message in the LLM prompt. Figures are formatted to two
    /// decimals; an empty range is said out loud so the model can
    /// answer "no data available" instead of inventing numbers.
    pub fn render_prompt(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Venue: {} ({})\n",
            self.venue_name, self.venue_type
        ));
        out.push_str(&format!(
            "Period: {} ({} to {})\n",
            self.range.label, self.range.start, self.range.end
        ));
        if !self.range_was_parsed {
            out.push_str("Note: no date phrase was recognized in the question; figures below cover the default recent window.\n");
        }

        let agg = &self.aggregation;
        if agg.no_data_found {
            out.push_str("Revenue data: no data found for this period.\n");
            return out;
        }

        out.push_str(&format!(
            "Total revenue: ${}\n",
            agg.total_revenue.round_dp(2)
        ));
        out.push_str(&format!("Total checks: {}\n", agg.total_checks));
        out.push_str(&format!(
            "Average check: ${}\n",
            agg.average_check.round_dp(2)
        ));
        out.push_str(&format!(
            "Days with data: {} of {} calendar days\n",
            agg.day_count, agg.calendar_days
        ));
        if agg.day_count < agg.calendar_days {
            out.push_str(&format!(
                "Warning: {} calendar days in this period have no ledger data.\n",
                agg.calendar_days - agg.day_count
            ));
        }
        if let Some(best) = &agg.best_day {
            out.push_str(&format!(
                "Best day: {} ({}) ${}\n",
                best.date,
                best.day_of_week,
                best.revenue.round_dp(2)
            ));
        }
        if let Some(worst) = &agg.worst_day {
            out.push_str(&format!(
                "Slowest day: {} ({}) ${}\n",
                worst.date,
                worst.day_of_week,
                worst.revenue.round_dp(2)
            ));
        }

        out.push_str("Daily breakdown:\n");
        for day in &agg.daily_breakdown {
            out.push_str(&format!(
                "  {} ({}): ${} across {} checks\n",
                day.date,
                day.day_of_week,
                day.revenue.round_dp(2),
                day.check_count
            ));
        }

        if let (Some(previous), Some(deltas)) = (&self.previous, &self.comparison) {
            out.push_str(&format!(
                "Previous period total: ${}\n",
                previous.total_revenue.round_dp(2)
            ));
            out.push_str(&format!(
                "Revenue change: ${}{}\n",
                deltas.revenue_delta.round_dp(2),
                deltas
                    .revenue_change_percent
                    .map(|p| format!(" ({}%)", p))
                    .unwrap_or_default()
            ));
            out.push_str(&format!("Check count change: {}\n", deltas.check_delta));
        }

        out
    }

    /// Chart entries for the dashboard: a daily revenue line for
    /// revenue questions with data, plus a comparison card when a
    /// period comparison ran.
    pub fn visualizations(&self) -> Vec<Visualization> {
        let mut charts = Vec::new();

        if self.query_type == QueryType::Revenue && !self.aggregation.no_data_found {
            charts.push(Visualization {
                chart_type: "line".to_string(),
                title: format!("Daily Revenue — {}", self.range.label),
                data: json!(self.aggregation.daily_breakdown),
                x_axis: Some("date".to_string()),
                y_axis: Some("revenue".to_string()),
            });
        }

        if let (Some(previous), Some(deltas)) = (&self.previous, &self.comparison) {
            charts.push(Visualization {
                chart_type: "comparison".to_string(),
                title: "Period Comparison".to_string(),
                data: json!({
                    "current": self.aggregation,
                    "previous": previous,
                    "change": deltas,
                }),
                x_axis: None,
                y_axis: None,
            });
        }

        charts
    }
}

/// System prompt for the LLM: an experienced operator persona plus the
/// date grounding the model needs to not call past dates "future".
pub fn system_prompt(venue: &VenueConfig, today: chrono::NaiveDate) -> String {
    format!(
        "You are an experienced restaurant and bar operator advising the owner of {name}, a {venue_type}. \
You answer questions about revenue and operations using only the figures provided in the context block. \
Today's date is {today}; any date before it is in the past and covered by the data you are given. \
If the context says no data was found for a period, say so plainly instead of estimating. \
Be direct and practical, cite the specific numbers you were given, and keep answers short.",
        name = venue.name,
        venue_type = venue.venue_type,
        today = today.format("%A, %B %-d, %Y"),
    )
}
