//! Domain models for programs, participants, attendance records and journals.

pub mod attendance;
pub mod journal;
pub mod participant;
pub mod program;
