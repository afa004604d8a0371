use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::connection::{CsvConnection, ATTENDANCE_FILE};
use crate::backend::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::backend::storage::fields::{
    format_date, format_timestamp, optional_text, parse_date, parse_timestamp,
};
use crate::backend::storage::traits::AttendanceStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AttendanceRow {
    id: String,
    participant_id: String,
    program_id: String,
    date: String,
    status: String,
    reason: String,
    created_at: String,
}

impl AttendanceRow {
    fn from_domain(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id.clone(),
            participant_id: record.participant_id.clone(),
            program_id: record.program_id.clone(),
            date: format_date(record.date),
            status: record.status.as_str().to_string(),
            reason: record.reason.clone().unwrap_or_default(),
            created_at: format_timestamp(record.created_at),
        }
    }

    fn into_domain(self) -> Result<AttendanceRecord> {
        Ok(AttendanceRecord {
            id: self.id,
            participant_id: self.participant_id,
            program_id: self.program_id,
            date: parse_date(&self.date)?,
            status: AttendanceStatus::from(self.status),
            reason: optional_text(&self.reason),
            created_at: parse_timestamp(&self.created_at)?,
        })
    }

    fn matches(&self, participant_id: &str, date: &str) -> bool {
        self.participant_id == participant_id && self.date == date
    }
}

pub(super) struct PrunedRecords {
    kept: Vec<AttendanceRow>,
    pub(super) removed: usize,
}

impl PrunedRecords {
    pub(super) fn write(&self, connection: &CsvConnection) -> Result<()> {
        connection.write_rows(ATTENDANCE_FILE, &self.kept)
    }
}

/// Filter out the records of a program and of its participants. Nothing is written.
/// The caller must hold the connection lock
pub(super) fn prune_program_records(
    connection: &CsvConnection,
    program_id: &str,
    participant_ids: &[String],
) -> Result<PrunedRecords> {
    let participants: HashSet<&str> = participant_ids.iter().map(String::as_str).collect();
    let rows: Vec<AttendanceRow> = connection.read_rows(ATTENDANCE_FILE)?;
    let before = rows.len();
    let kept: Vec<AttendanceRow> = rows
        .into_iter()
        .filter(|row| row.program_id != program_id && !participants.contains(row.participant_id.as_str()))
        .collect();
    let removed = before - kept.len();
    Ok(PrunedRecords { kept, removed })
}

/// CSV-backed attendance repository
#[derive(Clone)]
pub struct AttendanceRepository {
    connection: CsvConnection,
}

impl AttendanceRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<AttendanceRow>> {
        self.connection.read_rows(ATTENDANCE_FILE)
    }

    fn collect_sorted<F>(&self, keep: F) -> Result<Vec<AttendanceRecord>>
    where
        F: Fn(&AttendanceRow) -> bool,
    {
        let mut records = self
            .read_records()?
            .into_iter()
            .filter(|row| keep(row))
            .map(AttendanceRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(records)
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn upsert_record(&self, record: &AttendanceRecord) -> Result<AttendanceRecord> {
        let _guard = self.connection.lock().await;
        let mut rows = self.read_records()?;
        let incoming = AttendanceRow::from_domain(record);

        let stored = match rows
            .iter_mut()
            .find(|row| row.matches(&incoming.participant_id, &incoming.date))
        {
            Some(existing) => {
                *existing = AttendanceRow {
                    id: existing.id.clone(),
                    created_at: existing.created_at.clone(),
                    ..incoming
                };
                existing.clone()
            }
            None => {
                rows.push(incoming.clone());
                incoming
            }
        };

        self.connection.write_rows(ATTENDANCE_FILE, &rows)?;
        stored.into_domain()
    }

    async fn delete_record(&self, participant_id: &str, date: NaiveDate) -> Result<bool> {
        let _guard = self.connection.lock().await;
        let date = format_date(date);
        let mut rows = self.read_records()?;
        let before = rows.len();
        rows.retain(|row| !row.matches(participant_id, &date));

        if rows.len() == before {
            return Ok(false);
        }
        self.connection.write_rows(ATTENDANCE_FILE, &rows)?;
        Ok(true)
    }

    async fn get_record(&self, participant_id: &str, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
        let _guard = self.connection.lock().await;
        let date = format_date(date);
        self.read_records()?
            .into_iter()
            .find(|row| row.matches(participant_id, &date))
            .map(AttendanceRow::into_domain)
            .transpose()
    }

    async fn list_records_by_date(&self, program_id: &str, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let _guard = self.connection.lock().await;
        let date = format_date(date);
        self.collect_sorted(|row| row.program_id == program_id && row.date == date)
    }

    async fn list_records(&self, program_id: Option<&str>) -> Result<Vec<AttendanceRecord>> {
        let _guard = self.connection.lock().await;
        self.collect_sorted(|row| program_id.map_or(true, |id| row.program_id == id))
    }
}
