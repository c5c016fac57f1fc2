//! Natural-language query parsing
//!
//! Pure text-processing core: turns a free-text chat message into a
//! concrete date range and a query-type routing hint. No I/O happens
//! here; "today" is always injected by the caller so parsing stays
//! deterministic and testable.

pub mod classifier;
pub mod dates;

pub use classifier::{classify, QueryType};
pub use dates::{parse, parse_comparison, ParsedDateRange};
