//! Date-range resolution for the attendance dashboard.
//!
//! Weeks start on Monday. All functions are pure and work across month and
//! year boundaries.

use chrono::{Datelike, Duration, NaiveDate};

use super::errors::{DomainError, DomainResult};

/// Korean short weekday names, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Calendar service that resolves week and month windows
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// The 7 dates of the Monday-start week containing `anchor`
    pub fn week_of(&self, anchor: NaiveDate) -> Vec<NaiveDate> {
        let sunday_index = anchor.weekday().num_days_from_sunday() as i64;
        let monday = anchor - Duration::days((sunday_index + 6) % 7);
        (0..7).map(|offset| monday + Duration::days(offset)).collect()
    }

    /// Every date of a calendar month
    pub fn month_of(&self, year: i32, month: u32) -> DomainResult<Vec<NaiveDate>> {
        let days = days_in_month(year, month)
            .ok_or_else(|| DomainError::Validation(format!("invalid month {}-{}", year, month)))?;

        (1..=days)
            .map(|day| {
                NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or_else(|| DomainError::Validation(format!("invalid date {}-{}-{}", year, month, day)))
            })
            .collect()
    }

    /// Move the anchor by whole weeks
    pub fn shift_week(&self, anchor: NaiveDate, delta: i64) -> NaiveDate {
        anchor + Duration::days(7 * delta)
    }

    /// Move the anchor by whole months, clamping the day to the target month's length
    pub fn shift_month(&self, anchor: NaiveDate, delta: i32) -> NaiveDate {
        let months = anchor.year() * 12 + anchor.month0() as i32 + delta;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) as u32 + 1;
        let last_day = days_in_month(year, month).unwrap_or(28);

        NaiveDate::from_ymd_opt(year, month, anchor.day().min(last_day)).unwrap_or(anchor)
    }

    pub fn weekday_name(&self, date: NaiveDate) -> &'static str {
        WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
    }

    /// "MM-DD ~ MM-DD" for a non-empty window
    pub fn week_label(&self, window: &[NaiveDate]) -> String {
        match (window.first(), window.last()) {
            (Some(start), Some(end)) => format!("{} ~ {}", start.format("%m-%d"), end.format("%m-%d")),
            _ => String::new(),
        }
    }

    pub fn month_label(&self, year: i32, month: u32) -> String {
        format!("{}년 {}월", year, month)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, or None for a month outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}
