use serde::{Deserialize, Serialize};

/// A program (class or course) that groups participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// A person whose attendance is tracked within one program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub program_id: String,
    /// "active" or "inactive"
    pub status: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp, only present for inactive participants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

/// One attendance status for a participant on a calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub participant_id: String,
    pub program_id: String,
    /// YYYY-MM-DD
    pub date: String,
    /// "present", "absent" or "early_leave"
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Free-text daily note for a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub id: String,
    pub program_id: String,
    /// YYYY-MM-DD
    pub date: String,
    pub content: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Request to create a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramListResponse {
    pub programs: Vec<Program>,
}

/// Request to register a participant in a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantRequest {
    pub name: String,
    pub program_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantListResponse {
    pub participants: Vec<Participant>,
}

/// Tap on the tri-state attendance control.
///
/// Marking the status that is already stored removes the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub participant_id: String,
    pub program_id: String,
    pub date: String,
    pub status: String,
    /// Reason currently staged by the client for this participant
    #[serde(default)]
    pub reason: Option<String>,
}

/// What a mark request did to the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkAction {
    Saved,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceResponse {
    pub action: MarkAction,
    /// The stored record when `action` is `saved`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
}

/// Explicit upsert of an attendance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAttendanceRequest {
    pub participant_id: String,
    pub program_id: String,
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request to change the reason of an absent or early-leave record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReasonRequest {
    pub participant_id: String,
    pub program_id: String,
    pub date: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickReasonsResponse {
    pub reasons: Vec<String>,
}

/// Request to save the journal of a program for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveJournalRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalListResponse {
    pub journals: Vec<Journal>,
}

/// Headcounts for the Monday-start week containing an anchor date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// "MM-DD ~ MM-DD"
    pub week_label: String,
    pub start_date: String,
    pub end_date: String,
    /// Distinct participants with at least one present record (실인원)
    pub actual_count: u32,
    /// Present records, counting repeats (연인원)
    pub total_count: u32,
}

/// Headcounts for a calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// "<year>년 <month>월"
    pub month_label: String,
    pub year: i32,
    pub month: u32,
    pub actual_count: u32,
    pub total_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub program_id: String,
    pub weekly: WeeklyStats,
    pub monthly: MonthlyStats,
}

/// Dates of a week or month window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindowResponse {
    pub dates: Vec<String>,
}

/// Request for a spreadsheet export; all programs when `program_id` is absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub program_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_camel_case_and_skips_missing_reason() {
        let record = AttendanceRecord {
            id: "r1".to_string(),
            participant_id: "p1".to_string(),
            program_id: "g1".to_string(),
            date: "2024-06-03".to_string(),
            status: "present".to_string(),
            reason: None,
            created_at: "2024-06-03T09:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["participantId"], "p1");
        assert_eq!(json["programId"], "g1");
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn test_mark_request_reason_is_optional() {
        let request: MarkAttendanceRequest = serde_json::from_str(
            r#"{"participantId":"p1","programId":"g1","date":"2024-06-03","status":"absent"}"#,
        )
        .unwrap();
        assert_eq!(request.reason, None);
        assert_eq!(request.status, "absent");
    }

    #[test]
    fn test_mark_action_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MarkAction::Removed).unwrap(), "\"removed\"");
    }
}
