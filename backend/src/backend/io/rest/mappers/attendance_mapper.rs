//! Mapper between attendance DTOs and the domain.

use super::parse_request_date;
use crate::backend::domain::attendance_service::{AttendanceEntry, MarkOutcome};
use crate::backend::domain::errors::DomainResult;
use crate::backend::domain::models::attendance::{AttendanceRecord as DomainRecord, AttendanceStatus};
use crate::backend::storage::fields::{format_date, format_timestamp};
use shared::{
    AttendanceRecord as SharedRecord, MarkAction, MarkAttendanceRequest, MarkAttendanceResponse,
    UpsertAttendanceRequest,
};

pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            id: domain.id,
            participant_id: domain.participant_id,
            program_id: domain.program_id,
            date: format_date(domain.date),
            status: domain.status.as_str().to_string(),
            reason: domain.reason,
            created_at: format_timestamp(domain.created_at),
        }
    }

    pub fn mark_to_entry(request: MarkAttendanceRequest) -> DomainResult<AttendanceEntry> {
        Ok(AttendanceEntry {
            date: parse_request_date(&request.date)?,
            participant_id: request.participant_id,
            program_id: request.program_id,
            status: AttendanceStatus::from(request.status),
            reason: request.reason,
        })
    }

    pub fn upsert_to_entry(request: UpsertAttendanceRequest) -> DomainResult<AttendanceEntry> {
        Ok(AttendanceEntry {
            date: parse_request_date(&request.date)?,
            participant_id: request.participant_id,
            program_id: request.program_id,
            status: AttendanceStatus::from(request.status),
            reason: request.reason,
        })
    }

    pub fn to_mark_response(outcome: MarkOutcome) -> MarkAttendanceResponse {
        match outcome {
            MarkOutcome::Saved(record) => MarkAttendanceResponse {
                action: MarkAction::Saved,
                record: Some(Self::to_dto(record)),
            },
            MarkOutcome::Removed => MarkAttendanceResponse {
                action: MarkAction::Removed,
                record: None,
            },
        }
    }
}
