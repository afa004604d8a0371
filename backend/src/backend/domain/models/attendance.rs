//! Domain model for attendance records.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance status of a participant on a day.
///
/// Values read back from storage that are not one of the three known statuses
/// are kept verbatim in `Unrecognized` so they can still be exported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    EarlyLeave,
    Unrecognized(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::EarlyLeave => "early_leave",
            AttendanceStatus::Unrecognized(raw) => raw,
        }
    }

    /// Localized label used in exports; unknown statuses pass through raw
    pub fn label(&self) -> &str {
        match self {
            AttendanceStatus::Present => "출석",
            AttendanceStatus::Absent => "결석",
            AttendanceStatus::EarlyLeave => "조퇴",
            AttendanceStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AttendanceStatus::Unrecognized(_))
    }

    /// Whether a reason may be attached to a record with this status
    pub fn accepts_reason(&self) -> bool {
        matches!(self, AttendanceStatus::Absent | AttendanceStatus::EarlyLeave)
    }
}

impl From<&str> for AttendanceStatus {
    fn from(value: &str) -> Self {
        match value {
            "present" => AttendanceStatus::Present,
            "absent" => AttendanceStatus::Absent,
            "early_leave" => AttendanceStatus::EarlyLeave,
            other => AttendanceStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for AttendanceStatus {
    fn from(value: String) -> Self {
        AttendanceStatus::from(value.as_str())
    }
}

impl From<AttendanceStatus> for String {
    fn from(value: AttendanceStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quick-pick reasons offered for absent and early-leave records
pub const QUICK_REASONS: [&str; 4] = ["병원 방문", "가족 행사", "무단 결석", "기타"];

/// Attendance status of one participant on one day.
///
/// There is at most one record per (participant_id, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub participant_id: String,
    pub program_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(
        participant_id: &str,
        program_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            participant_id: participant_id.to_string(),
            program_id: program_id.to_string(),
            date,
            status,
            reason,
            created_at: now,
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_known_values() {
        for raw in ["present", "absent", "early_leave"] {
            let status = AttendanceStatus::from(raw);
            assert!(status.is_known());
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_unrecognized_status_is_preserved() {
        let status = AttendanceStatus::from("late");
        assert!(!status.is_known());
        assert_eq!(status.as_str(), "late");
        assert_eq!(status.label(), "late");
    }

    #[test]
    fn test_labels() {
        assert_eq!(AttendanceStatus::Present.label(), "출석");
        assert_eq!(AttendanceStatus::Absent.label(), "결석");
        assert_eq!(AttendanceStatus::EarlyLeave.label(), "조퇴");
    }

    #[test]
    fn test_only_absent_and_early_leave_accept_reason() {
        assert!(!AttendanceStatus::Present.accepts_reason());
        assert!(AttendanceStatus::Absent.accepts_reason());
        assert!(AttendanceStatus::EarlyLeave.accepts_reason());
    }
}
