//! SQLite implementations of the storage traits.

pub mod attendance_repository;
pub mod journal_repository;
pub mod participant_repository;
pub mod program_repository;

pub use attendance_repository::AttendanceRepository;
pub use journal_repository::JournalRepository;
pub use participant_repository::ParticipantRepository;
pub use program_repository::ProgramRepository;
