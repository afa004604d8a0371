//! # Storage Traits
//!
//! Storage abstraction that lets the SQLite and CSV backends be used
//! interchangeably by the domain layer.
//!
//! Both backends honor the same natural-key contracts:
//! - attendance records are unique per `(participant_id, date)`
//! - journals are unique per `(program_id, date)`
//!
//! An upsert on an existing key replaces every mutable field and keeps the `id`
//! and `created_at` of the row it replaces.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::backend::domain::models::attendance::AttendanceRecord;
use crate::backend::domain::models::journal::Journal;
use crate::backend::domain::models::participant::Participant;
use crate::backend::domain::models::program::Program;

#[async_trait]
pub trait ProgramStorage: Send + Sync {
    async fn store_program(&self, program: &Program) -> Result<()>;

    async fn get_program(&self, program_id: &str) -> Result<Option<Program>>;

    /// List all programs ordered by creation time (oldest first)
    async fn list_programs(&self) -> Result<Vec<Program>>;

    /// Delete a program together with its participants, their attendance
    /// records and the program's journals.
    /// Returns true if the program existed
    async fn delete_program(&self, program_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ParticipantStorage: Send + Sync {
    async fn store_participant(&self, participant: &Participant) -> Result<()>;

    async fn get_participant(&self, participant_id: &str) -> Result<Option<Participant>>;

    /// List participants ordered by creation time, optionally for one program
    async fn list_participants(&self, program_id: Option<&str>) -> Result<Vec<Participant>>;

    /// Overwrite status and ended_at of an existing participant
    async fn update_participant(&self, participant: &Participant) -> Result<()>;
}

#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// Insert or replace the record for `(participant_id, date)`.
    /// Returns the record as stored
    async fn upsert_record(&self, record: &AttendanceRecord) -> Result<AttendanceRecord>;

    /// Delete the record for `(participant_id, date)` if any.
    /// Returns true if a record was deleted
    async fn delete_record(&self, participant_id: &str, date: NaiveDate) -> Result<bool>;

    async fn get_record(&self, participant_id: &str, date: NaiveDate) -> Result<Option<AttendanceRecord>>;

    /// All records of a program on one day
    async fn list_records_by_date(&self, program_id: &str, date: NaiveDate) -> Result<Vec<AttendanceRecord>>;

    /// All records, optionally restricted to one program
    async fn list_records(&self, program_id: Option<&str>) -> Result<Vec<AttendanceRecord>>;
}

#[async_trait]
pub trait JournalStorage: Send + Sync {
    /// Insert or overwrite the content for `(program_id, date)`.
    /// Returns the journal as stored
    async fn upsert_journal(&self, journal: &Journal) -> Result<Journal>;

    async fn get_journal(&self, program_id: &str, date: NaiveDate) -> Result<Option<Journal>>;

    /// All journals, optionally restricted to one program
    async fn list_journals(&self, program_id: Option<&str>) -> Result<Vec<Journal>>;
}

/// A storage connection that hands out repositories.
///
/// The domain layer is generic over this trait and never sees which backend
/// it is talking to.
pub trait Connection: Send + Sync + Clone + 'static {
    type ProgramRepository: ProgramStorage + Clone + 'static;
    type ParticipantRepository: ParticipantStorage + Clone + 'static;
    type AttendanceRepository: AttendanceStorage + Clone + 'static;
    type JournalRepository: JournalStorage + Clone + 'static;

    fn create_program_repository(&self) -> Self::ProgramRepository;
    fn create_participant_repository(&self) -> Self::ParticipantRepository;
    fn create_attendance_repository(&self) -> Self::AttendanceRepository;
    fn create_journal_repository(&self) -> Self::JournalRepository;
}
