//! # CSV Storage Module
//!
//! File-based backend: one CSV file per entity inside a data directory.
//!
//! ```text
//! <data_dir>/programs.csv      id,name,created_at
//! <data_dir>/participants.csv  id,name,program_id,status,created_at,ended_at
//! <data_dir>/attendance.csv    id,participant_id,program_id,date,status,reason,created_at
//! <data_dir>/journals.csv      id,program_id,date,content,created_at
//! ```
//!
//! Every change reads the whole file, applies the change in memory and writes
//! the file back through a temporary file and an atomic rename. Natural-key
//! upserts replace the existing row in place.

pub mod attendance_repository;
pub mod connection;
pub mod journal_repository;
pub mod participant_repository;
pub mod program_repository;

#[cfg(test)]
pub mod test_utils;

pub use attendance_repository::AttendanceRepository;
pub use connection::CsvConnection;
pub use journal_repository::JournalRepository;
pub use participant_repository::ParticipantRepository;
pub use program_repository::ProgramRepository;
