//! API handlers for VenueSync REST endpoints

pub mod chat;
pub mod health;
pub mod openapi;
pub mod revenue;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Parse a `YYYY-MM-DD` query parameter, naming the offending
/// parameter in the error.
pub fn parse_date_param(value: &str, name: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("invalid {}: expected YYYY-MM-DD, got '{}'", name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let date = parse_date_param("2025-08-10", "start_date").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 10).unwrap());
    }

    #[test]
    fn rejects_garbage_with_the_parameter_name() {
        let err = parse_date_param("08/10/2025", "end_date").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("end_date")));
    }
}
