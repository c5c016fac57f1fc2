//! Query-type classifier
//!
//! Keyword routing for chat messages. The tests run in a fixed order
//! and the first hit wins; a message touching several categories is
//! classified by whichever test runs first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Routing hint for which downstream aggregation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Revenue,
    Menu,
    Customers,
    Labor,
    General,
}

// Checked in order: revenue -> menu -> customers -> labor.
static KEYWORD_TESTS: Lazy<Vec<(QueryType, Regex)>> = Lazy::new(|| {
    vec![
        (
            QueryType::Revenue,
            Regex::new(r"(?i)revenue|sales|money|earnings|income|profit|loss|drop|increase|decrease")
                .unwrap(),
        ),
        (
            QueryType::Menu,
            Regex::new(r"(?i)menu|item|dish|drink|pour cost|food cost|best seller|popular|selling")
                .unwrap(),
        ),
        (
            QueryType::Customers,
            Regex::new(r"(?i)customer|guest|patron|loyalty|retention|new vs returning|visits")
                .unwrap(),
        ),
        (
            QueryType::Labor,
            Regex::new(r"(?i)labor|staff|employee|wage|payroll|overtime|scheduling").unwrap(),
        ),
    ]
});

/// Classify a chat message into exactly one [`QueryType`].
pub fn classify(message: &str) -> QueryType {
    for (query_type, test) in KEYWORD_TESTS.iter() {
        if test.is_match(message) {
            return *query_type;
        }
    }
    QueryType::General
}
