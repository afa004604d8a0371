//! # Domain Layer
//!
//! Business rules of the attendance tracker. Services are generic over the
//! storage [`Connection`](crate::backend::storage::Connection) and never see
//! which backend they run on.

pub mod attendance_service;
pub mod calendar;
pub mod errors;
pub mod export_service;
pub mod journal_service;
pub mod models;
pub mod participant_service;
pub mod program_service;
pub mod session_service;
pub mod statistics_service;

pub use attendance_service::{AttendanceEntry, AttendanceService, MarkOutcome};
pub use calendar::CalendarService;
pub use errors::{DomainError, DomainResult};
pub use export_service::{Cell, ExportService, Sheet, Workbook};
pub use journal_service::JournalService;
pub use participant_service::ParticipantService;
pub use program_service::ProgramService;
pub use session_service::SessionService;
pub use statistics_service::{AttendanceCounts, MonthlyStats, ProgramDashboard, StatisticsService, WeeklyStats};
