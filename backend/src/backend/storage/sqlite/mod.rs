//! # SQLite Storage Module
//!
//! Relational backend built on SQLx. Natural-key uniqueness is enforced by the
//! schema and upserts use `INSERT ... ON CONFLICT ... DO UPDATE`.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    AttendanceRepository as SqliteAttendanceRepository,
    JournalRepository as SqliteJournalRepository,
    ParticipantRepository as SqliteParticipantRepository,
    ProgramRepository as SqliteProgramRepository,
};
