//! Record reconciliation: at most one attendance status per participant per day.
//!
//! A tri-state control drives the service through [`AttendanceService::mark`]:
//! tapping the status that is already stored clears it, tapping another one
//! replaces it.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{DomainError, DomainResult};
use super::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::backend::storage::{AttendanceStorage, Connection};

/// Input of an upsert or mark
#[derive(Debug, Clone)]
pub struct AttendanceEntry {
    pub participant_id: String,
    pub program_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub reason: Option<String>,
}

/// What a mark did to the stored record
#[derive(Debug, Clone, PartialEq)]
pub enum MarkOutcome {
    Saved(AttendanceRecord),
    Removed,
}

#[derive(Clone)]
pub struct AttendanceService<C: Connection> {
    attendance_repository: C::AttendanceRepository,
}

impl<C: Connection> AttendanceService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            attendance_repository: connection.create_attendance_repository(),
        }
    }

    /// Replace any record for (participant, date) with `entry`
    pub async fn upsert(&self, entry: AttendanceEntry) -> DomainResult<AttendanceRecord> {
        if !entry.status.is_known() {
            return Err(DomainError::Validation(format!("unknown attendance status: {}", entry.status)));
        }
        if entry.participant_id.trim().is_empty() || entry.program_id.trim().is_empty() {
            return Err(DomainError::Validation("participant and program are required".to_string()));
        }

        let reason = normalize_reason(&entry.status, entry.reason.as_deref());
        let record = AttendanceRecord::new(
            &entry.participant_id,
            &entry.program_id,
            entry.date,
            entry.status,
            reason,
            Utc::now(),
        );

        let stored = self.attendance_repository.upsert_record(&record).await?;
        info!(
            "Saved {} for participant {} on {}",
            stored.status, stored.participant_id, stored.date
        );
        Ok(stored)
    }

    /// Delete the record for (participant, date); false when there was none
    pub async fn remove(&self, participant_id: &str, date: NaiveDate) -> DomainResult<bool> {
        let removed = self.attendance_repository.delete_record(participant_id, date).await?;
        if removed {
            info!("Removed attendance of participant {} on {}", participant_id, date);
        }
        Ok(removed)
    }

    /// Apply one tap of the tri-state control
    pub async fn mark(&self, entry: AttendanceEntry) -> DomainResult<MarkOutcome> {
        if !entry.status.is_known() {
            return Err(DomainError::Validation(format!("unknown attendance status: {}", entry.status)));
        }

        let current = self
            .attendance_repository
            .get_record(&entry.participant_id, entry.date)
            .await?;

        match current {
            Some(existing) if existing.status == entry.status => {
                self.remove(&entry.participant_id, entry.date).await?;
                Ok(MarkOutcome::Removed)
            }
            _ => Ok(MarkOutcome::Saved(self.upsert(entry).await?)),
        }
    }

    /// Re-save an absent or early-leave record with a new reason.
    /// Returns None when there is no such record
    pub async fn update_reason(
        &self,
        participant_id: &str,
        program_id: &str,
        date: NaiveDate,
        reason: &str,
    ) -> DomainResult<Option<AttendanceRecord>> {
        let current = self.attendance_repository.get_record(participant_id, date).await?;

        match current {
            Some(existing) if existing.status.accepts_reason() => {
                let entry = AttendanceEntry {
                    participant_id: participant_id.to_string(),
                    program_id: program_id.to_string(),
                    date,
                    status: existing.status,
                    reason: Some(reason.to_string()),
                };
                self.upsert(entry).await.map(Some)
            }
            _ => {
                warn!("No absent or early-leave record for {} on {}, reason ignored", participant_id, date);
                Ok(None)
            }
        }
    }

    pub async fn records_for_date(&self, program_id: &str, date: NaiveDate) -> DomainResult<Vec<AttendanceRecord>> {
        Ok(self.attendance_repository.list_records_by_date(program_id, date).await?)
    }

    /// All records, optionally for one program, ordered by date
    pub async fn records_for_program(&self, program_id: Option<&str>) -> DomainResult<Vec<AttendanceRecord>> {
        Ok(self.attendance_repository.list_records(program_id).await?)
    }
}

/// Present records carry no reason; blank reasons are stored as absent
fn normalize_reason(status: &AttendanceStatus, reason: Option<&str>) -> Option<String> {
    if !status.accepts_reason() {
        return None;
    }
    reason
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(str::to_string)
}
