//! # Storage Module
//!
//! Data persistence for the attendance tracker.
//!
//! Two backends implement the same [`traits::Connection`] interface:
//!
//! - **sqlite**: relational storage through SQLx, natural-key uniqueness
//!   enforced by unique indexes and `ON CONFLICT` upserts
//! - **csv**: one CSV file per entity in a data directory, rewritten atomically
//!   on every change
//!
//! The domain layer depends on the traits only.

pub mod csv;
pub mod fields;
pub mod sqlite;
pub mod traits;

pub use self::csv::CsvConnection;
pub use sqlite::DbConnection;
pub use traits::{AttendanceStorage, Connection, JournalStorage, ParticipantStorage, ProgramStorage};
