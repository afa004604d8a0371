//! Headcount statistics over week and month windows.
//!
//! Only `present` records count. `total_count` is the number of present
//! records in the window (연인원) and `actual_count` the number of distinct
//! participants among them (실인원), so `actual_count <= total_count` always.

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::calendar::CalendarService;
use super::errors::DomainResult;
use super::models::attendance::AttendanceRecord;
use crate::backend::storage::{AttendanceStorage, Connection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub actual_count: u32,
    pub total_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyStats {
    pub week_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub counts: AttendanceCounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStats {
    pub month_label: String,
    pub year: i32,
    pub month: u32,
    pub counts: AttendanceCounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDashboard {
    pub program_id: String,
    pub weekly: WeeklyStats,
    pub monthly: MonthlyStats,
}

/// Reduce records to counts over the dates of `window`
pub fn aggregate(records: &[AttendanceRecord], window: &[NaiveDate]) -> AttendanceCounts {
    let window: HashSet<NaiveDate> = window.iter().copied().collect();

    let present: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.is_present() && window.contains(&record.date))
        .collect();
    let participants: HashSet<&str> = present.iter().map(|record| record.participant_id.as_str()).collect();

    AttendanceCounts {
        actual_count: participants.len() as u32,
        total_count: present.len() as u32,
    }
}

#[derive(Clone)]
pub struct StatisticsService<C: Connection> {
    attendance_repository: C::AttendanceRepository,
    calendar: CalendarService,
}

impl<C: Connection> StatisticsService<C> {
    pub fn new(connection: Arc<C>, calendar: CalendarService) -> Self {
        Self {
            attendance_repository: connection.create_attendance_repository(),
            calendar,
        }
    }

    pub fn weekly_stats(&self, records: &[AttendanceRecord], anchor: NaiveDate) -> WeeklyStats {
        let window = self.calendar.week_of(anchor);
        WeeklyStats {
            week_label: self.calendar.week_label(&window),
            start_date: window[0],
            end_date: window[window.len() - 1],
            counts: aggregate(records, &window),
        }
    }

    pub fn monthly_stats(&self, records: &[AttendanceRecord], year: i32, month: u32) -> DomainResult<MonthlyStats> {
        let window = self.calendar.month_of(year, month)?;
        Ok(MonthlyStats {
            month_label: self.calendar.month_label(year, month),
            year,
            month,
            counts: aggregate(records, &window),
        })
    }

    /// Weekly and monthly stats of one program around `anchor`
    pub async fn program_dashboard(&self, program_id: &str, anchor: NaiveDate) -> DomainResult<ProgramDashboard> {
        info!("Computing dashboard for program {} at {}", program_id, anchor);

        let records = self.attendance_repository.list_records(Some(program_id)).await?;
        let weekly = self.weekly_stats(&records, anchor);
        let monthly = self.monthly_stats(&records, anchor.year(), anchor.month())?;

        Ok(ProgramDashboard {
            program_id: program_id.to_string(),
            weekly,
            monthly,
        })
    }
}
