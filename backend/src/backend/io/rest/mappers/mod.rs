//! Conversions between the shared wire DTOs and domain models.

pub mod attendance_mapper;
pub mod journal_mapper;
pub mod participant_mapper;
pub mod program_mapper;
pub mod stats_mapper;

use chrono::NaiveDate;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::storage::fields::DATE_FORMAT;

/// Parse a client-supplied `YYYY-MM-DD` date
pub fn parse_request_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::Validation(format!("invalid date: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_date() {
        assert_eq!(
            parse_request_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(parse_request_date("06/03/2024"), Err(DomainError::Validation(_))));
    }
}
