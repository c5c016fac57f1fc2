//! Date-phrase parser
//!
//! Converts phrases like "last weekend", "July 2025" or "last Friday"
//! into inclusive calendar ranges. Patterns are evaluated in the order
//! given by [`PRIORITY`]; the first match wins. The order is a contract,
//! not an accident: "Month YYYY" must run before the specific-day
//! pattern or a 4-digit year gets read as a day-of-month, and
//! "last weekend" must run before "last week" because the latter regex
//! matches a substring of the former.

use chrono::{Datelike, Days, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A resolved, inclusive calendar range with a human-readable echo of
/// what was matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParsedDateRange {
    /// First day of the range
    pub start: NaiveDate,
    /// Last day of the range (equal to `start` for single-day queries)
    pub end: NaiveDate,
    /// Echo of the matched phrase (e.g. "last weekend", "July 2025")
    pub label: String,
}

impl ParsedDateRange {
    /// Build a range, rejecting inverted bounds.
    pub fn new(start: NaiveDate, end: NaiveDate, label: impl Into<String>) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self {
            start,
            end,
            label: label.into(),
        })
    }

    /// Number of calendar days covered, inclusive.
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Recognized date-phrase patterns, in no particular order.
/// Evaluation order lives in [`PRIORITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    LastWeekend,
    ThisWeekend,
    Yesterday,
    Today,
    LastWeekday,
    LastWeek,
    ThisWeek,
    LastMonth,
    ThisMonth,
    MonthYear,
    MonthDay,
    MonthOnly,
    LastNDays,
    IsoDate,
    UsDate,
}

/// Pattern evaluation order. First match wins.
///
/// Load-bearing orderings:
/// - `LastWeekend` before `LastWeek` ("last week" is a substring)
/// - `MonthYear` before `MonthDay` (a year must not be read as a day)
/// - `MonthDay` before `MonthOnly` (a bare month name matches both)
pub const PRIORITY: [DatePattern; 15] = [
    DatePattern::LastWeekend,
    DatePattern::ThisWeekend,
    DatePattern::Yesterday,
    DatePattern::Today,
    DatePattern::LastWeekday,
    DatePattern::LastWeek,
    DatePattern::ThisWeek,
    DatePattern::LastMonth,
    DatePattern::ThisMonth,
    DatePattern::MonthYear,
    DatePattern::MonthDay,
    DatePattern::MonthOnly,
    DatePattern::LastNDays,
    DatePattern::IsoDate,
    DatePattern::UsDate,
];

// Full names first so the alternation never stops at an abbreviation
// prefix of a longer name; "sept" before "sep" for the same reason.
const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

static RE_LAST_WEEKEND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)last weekend").unwrap());
static RE_THIS_WEEKEND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)this weekend").unwrap());
static RE_YESTERDAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)yesterday").unwrap());
static RE_TODAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)today").unwrap());
static RE_LAST_WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)last (sunday|monday|tuesday|wednesday|thursday|friday|saturday)").unwrap()
});
static RE_LAST_WEEK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)last week").unwrap());
static RE_THIS_WEEK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)this week").unwrap());
static RE_LAST_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)last month").unwrap());
static RE_THIS_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)this month").unwrap());
static RE_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b({})\s+(\d{{4}})\b", MONTHS)).unwrap());
static RE_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({})\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:\s*,?\s*(\d{{4}}))?",
        MONTHS
    ))
    .unwrap()
});
static RE_MONTH_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b({})\b", MONTHS)).unwrap());
static RE_LAST_N_DAYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)last (\d+) days?").unwrap());
static RE_ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());
static RE_US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

static RE_COMPARISON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bvs\.?\b|\bversus\b|\bcompared\s+(?:to|with)\b").unwrap());

impl DatePattern {
    fn regex(self) -> &'static Regex {
        match self {
            DatePattern::LastWeekend => &RE_LAST_WEEKEND,
            DatePattern::ThisWeekend => &RE_THIS_WEEKEND,
            DatePattern::Yesterday => &RE_YESTERDAY,
            DatePattern::Today => &RE_TODAY,
            DatePattern::LastWeekday => &RE_LAST_WEEKDAY,
            DatePattern::LastWeek => &RE_LAST_WEEK,
            DatePattern::ThisWeek => &RE_THIS_WEEK,
            DatePattern::LastMonth => &RE_LAST_MONTH,
            DatePattern::ThisMonth => &RE_THIS_MONTH,
            DatePattern::MonthYear => &RE_MONTH_YEAR,
            DatePattern::MonthDay => &RE_MONTH_DAY,
            DatePattern::MonthOnly => &RE_MONTH_ONLY,
            DatePattern::LastNDays => &RE_LAST_N_DAYS,
            DatePattern::IsoDate => &RE_ISO_DATE,
            DatePattern::UsDate => &RE_US_DATE,
        }
    }

    /// Resolve a regex match into a range. Returns `None` when the
    /// handler would construct an invalid date (day 32, month 13, a
    /// year captured as a day); the caller falls through to the next
    /// pattern instead of returning a corrupt range.
    fn resolve(self, caps: &Captures, today: NaiveDate) -> Option<ParsedDateRange> {
        match self {
            DatePattern::LastWeekend => {
                // Most recently completed Fri-Sun span: walk back to the
                // prior Sunday, then 2 more days for Friday.
                let dow = day_of_week(today);
                let days_to_last_sunday = if dow == 0 { 7 } else { dow };
                let sunday = today - Duration::days(days_to_last_sunday);
                ParsedDateRange::new(sunday - Duration::days(2), sunday, "last weekend")
            }
            DatePattern::ThisWeekend => {
                let dow = day_of_week(today);
                let (friday, sunday) = if dow == 0 {
                    (today - Duration::days(2), today)
                } else if dow >= 5 {
                    (
                        today - Duration::days(dow - 5),
                        today + Duration::days(7 - dow),
                    )
                } else {
                    (
                        today + Duration::days(5 - dow),
                        today + Duration::days(7 - dow),
                    )
                };
                ParsedDateRange::new(friday, sunday, "this weekend")
            }
            DatePattern::Yesterday => {
                let date = today - Duration::days(1);
                ParsedDateRange::new(date, date, "yesterday")
            }
            DatePattern::Today => ParsedDateRange::new(today, today, "today"),
            DatePattern::LastWeekday => {
                let target = weekday_number(&caps[1])?;
                // "last Friday" asked on a Friday means a full week ago,
                // never today.
                let mut delta = (day_of_week(today) - target).rem_euclid(7);
                if delta == 0 {
                    delta = 7;
                }
                let date = today - Duration::days(delta);
                ParsedDateRange::new(date, date, format!("last {}", caps[1].to_lowercase()))
            }
            DatePattern::LastWeek => {
                // Previous Sunday-start calendar week.
                let start = today - Duration::days(7 + day_of_week(today));
                ParsedDateRange::new(start, start + Duration::days(6), "last week")
            }
            DatePattern::ThisWeek => {
                let start = today - Duration::days(day_of_week(today));
                ParsedDateRange::new(start, today, "this week")
            }
            DatePattern::LastMonth => {
                let first_of_current = today.with_day(1)?;
                let end = first_of_current - Duration::days(1);
                ParsedDateRange::new(end.with_day(1)?, end, "last month")
            }
            DatePattern::ThisMonth => {
                ParsedDateRange::new(today.with_day(1)?, today, "this month")
            }
            DatePattern::MonthYear => {
                let month = month_number(&caps[1])?;
                let year: i32 = caps[2].parse().ok()?;
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                ParsedDateRange::new(
                    start,
                    month_end(year, month)?,
                    format!("{} {}", titlecase(&caps[1]), year),
                )
            }
            DatePattern::MonthDay => {
                let month = month_number(&caps[1])?;
                let day: u32 = caps[2].parse().ok()?;
                let year = match caps.get(3) {
                    Some(y) => y.as_str().parse().ok()?,
                    // No year given: the most recent occurrence. A month
                    // later in the year than the current one must mean
                    // last year.
                    None => infer_year(month, today),
                };
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                ParsedDateRange::new(
                    date,
                    date,
                    format!("{} {}, {}", titlecase(&caps[1]), day, year),
                )
            }
            DatePattern::MonthOnly => {
                let month = month_number(&caps[1])?;
                let year = infer_year(month, today);
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                ParsedDateRange::new(
                    start,
                    month_end(year, month)?,
                    format!("{} {}", titlecase(&caps[1]), year),
                )
            }
            DatePattern::LastNDays => {
                let n: u64 = caps[1].parse().ok()?;
                let start = today.checked_sub_days(Days::new(n))?;
                ParsedDateRange::new(start, today, format!("last {} days", n))
            }
            DatePattern::IsoDate => {
                let year: i32 = caps[1].parse().ok()?;
                let month: u32 = caps[2].parse().ok()?;
                let day: u32 = caps[3].parse().ok()?;
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                ParsedDateRange::new(date, date, caps[0].to_string())
            }
            DatePattern::UsDate => {
                let month: u32 = caps[1].parse().ok()?;
                let day: u32 = caps[2].parse().ok()?;
                let year: i32 = caps[3].parse().ok()?;
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                ParsedDateRange::new(date, date, format!("{}/{}/{}", month, day, year))
            }
        }
    }
}

/// Parse the first recognized date phrase in `message` relative to the
/// injected `today`. Returns `None` when no pattern matches; the caller
/// supplies its own default window in that case.
pub fn parse(message: &str, today: NaiveDate) -> Option<ParsedDateRange> {
    for pattern in PRIORITY {
        if let Some(caps) = pattern.regex().captures(message) {
            if let Some(range) = pattern.resolve(&caps, today) {
                return Some(range);
            }
            // Matched but produced an invalid date: treat as a
            // non-match and keep going.
        }
    }
    None
}

/// Parse a comparative query like "this week vs last week". Both sides
/// of the separator must resolve to a range.
pub fn parse_comparison(
    message: &str,
    today: NaiveDate,
) -> Option<(ParsedDateRange, ParsedDateRange)> {
    let m = RE_COMPARISON.find(message)?;
    let current = parse(&message[..m.start()], today)?;
    let previous = parse(&message[m.end()..], today)?;
    Some((current, previous))
}

/// Day of week with Sunday = 0, matching the ledger's business-week
/// convention (weeks start on Sunday).
fn day_of_week(date: NaiveDate) -> i64 {
    date.weekday().num_days_from_sunday() as i64
}

fn weekday_number(name: &str) -> Option<i64> {
    match name.to_lowercase().as_str() {
        "sunday" => Some(0),
        "monday" => Some(1),
        "tuesday" => Some(2),
        "wednesday" => Some(3),
        "thursday" => Some(4),
        "friday" => Some(5),
        "saturday" => Some(6),
        _ => None,
    }
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    match prefix {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// A month with no explicit year means its most recent occurrence:
/// this year if the month has started, otherwise last year.
fn infer_year(month: u32, today: NaiveDate) -> i32 {
    if month <= today.month() {
        today.year()
    } else {
        today.year() - 1
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
