//! Export row building.
//!
//! Joins attendance records with participant and program names and the daily
//! journals into a workbook of flat sheets. Missing lookups become empty cells.
//! The workbook is format-agnostic; `io::spreadsheet` encodes it.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use super::calendar::CalendarService;
use super::errors::DomainResult;
use super::models::attendance::{AttendanceRecord, AttendanceStatus};
use super::models::journal::Journal;
use super::models::participant::Participant;
use super::models::program::Program;
use crate::backend::storage::fields::format_date;
use crate::backend::storage::{
    AttendanceStorage, Connection, JournalStorage, ParticipantStorage, ProgramStorage,
};

pub const LOG_SHEET: &str = "출석 로그";
pub const SUMMARY_SHEET: &str = "이용자 요약";
pub const JOURNAL_SHEET: &str = "일지";

const LOG_HEADER: [&str; 6] = ["날짜", "요일", "프로그램", "이용자", "출결", "사유"];
const SUMMARY_HEADER: [&str; 6] = ["프로그램", "이용자", "출석", "결석", "조퇴", "총일수"];
const JOURNAL_HEADER: [&str; 3] = ["날짜", "프로그램", "내용"];

const LOG_WIDTHS: [f64; 6] = [12.0, 6.0, 20.0, 12.0, 8.0, 20.0];
const SUMMARY_WIDTHS: [f64; 6] = [20.0, 12.0, 8.0, 8.0, 8.0, 8.0];
const JOURNAL_WIDTHS: [f64; 3] = [12.0, 20.0, 60.0];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// A named sheet; the first row is the header
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub column_widths: Vec<f64>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &str, header: &[&str], column_widths: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            column_widths: column_widths.to_vec(),
            rows: vec![header.iter().map(|title| Cell::text(title)).collect()],
        }
    }

    /// Rows below the header
    pub fn body(&self) -> &[Vec<Cell>] {
        &self.rows[1..]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

#[derive(Default)]
struct StatusTally {
    present: u32,
    absent: u32,
    early_leave: u32,
}

/// Build the log, summary and (when there are journals) journal sheets
pub fn build_workbook(
    records: &[AttendanceRecord],
    participants: &[Participant],
    programs: &[Program],
    journals: &[Journal],
    calendar: &CalendarService,
) -> Workbook {
    let program_names: HashMap<&str, &str> =
        programs.iter().map(|p| (p.id.as_str(), p.name.as_str())).collect();
    let participant_names: HashMap<&str, &str> =
        participants.iter().map(|p| (p.id.as_str(), p.name.as_str())).collect();
    let program_name = |id: &str| program_names.get(id).copied().unwrap_or("");

    let mut sorted_records: Vec<&AttendanceRecord> = records.iter().collect();
    sorted_records.sort_by_key(|record| record.date);

    let mut log = Sheet::new(LOG_SHEET, &LOG_HEADER, &LOG_WIDTHS);
    for record in sorted_records {
        log.rows.push(vec![
            Cell::Text(format_date(record.date)),
            Cell::text(calendar.weekday_name(record.date)),
            Cell::text(program_name(&record.program_id)),
            Cell::text(participant_names.get(record.participant_id.as_str()).copied().unwrap_or("")),
            Cell::text(record.status.label()),
            Cell::text(record.reason.as_deref().unwrap_or("")),
        ]);
    }

    let mut tallies: HashMap<&str, StatusTally> = HashMap::new();
    for record in records {
        let tally = tallies.entry(record.participant_id.as_str()).or_default();
        match record.status {
            AttendanceStatus::Present => tally.present += 1,
            AttendanceStatus::Absent => tally.absent += 1,
            AttendanceStatus::EarlyLeave => tally.early_leave += 1,
            AttendanceStatus::Unrecognized(_) => {}
        }
    }

    let mut summary = Sheet::new(SUMMARY_SHEET, &SUMMARY_HEADER, &SUMMARY_WIDTHS);
    for participant in participants {
        let tally = tallies.remove(participant.id.as_str()).unwrap_or_default();
        summary.rows.push(vec![
            Cell::text(program_name(&participant.program_id)),
            Cell::text(&participant.name),
            Cell::Number(tally.present as f64),
            Cell::Number(tally.absent as f64),
            Cell::Number(tally.early_leave as f64),
            Cell::Number((tally.present + tally.absent + tally.early_leave) as f64),
        ]);
    }

    let mut sheets = vec![log, summary];

    if !journals.is_empty() {
        let mut sorted_journals: Vec<&Journal> = journals.iter().collect();
        sorted_journals.sort_by_key(|journal| journal.date);

        let mut sheet = Sheet::new(JOURNAL_SHEET, &JOURNAL_HEADER, &JOURNAL_WIDTHS);
        for journal in sorted_journals {
            sheet.rows.push(vec![
                Cell::Text(format_date(journal.date)),
                Cell::text(program_name(&journal.program_id)),
                Cell::text(&journal.content),
            ]);
        }
        sheets.push(sheet);
    }

    Workbook { sheets }
}

#[derive(Clone)]
pub struct ExportService<C: Connection> {
    program_repository: C::ProgramRepository,
    participant_repository: C::ParticipantRepository,
    attendance_repository: C::AttendanceRepository,
    journal_repository: C::JournalRepository,
    calendar: CalendarService,
}

impl<C: Connection> ExportService<C> {
    pub fn new(connection: Arc<C>, calendar: CalendarService) -> Self {
        Self {
            program_repository: connection.create_program_repository(),
            participant_repository: connection.create_participant_repository(),
            attendance_repository: connection.create_attendance_repository(),
            journal_repository: connection.create_journal_repository(),
            calendar,
        }
    }

    /// Gather one program's data, or everything when `program_id` is None
    pub async fn export_workbook(&self, program_id: Option<&str>) -> DomainResult<Workbook> {
        let programs = match program_id {
            Some(id) => self.program_repository.get_program(id).await?.into_iter().collect(),
            None => self.program_repository.list_programs().await?,
        };
        let participants = self.participant_repository.list_participants(program_id).await?;
        let records = self.attendance_repository.list_records(program_id).await?;
        let journals = self.journal_repository.list_journals(program_id).await?;

        info!(
            "Exporting {} records, {} participants, {} journals",
            records.len(),
            participants.len(),
            journals.len()
        );

        Ok(build_workbook(&records, &participants, &programs, &journals, &self.calendar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn fixtures() -> (Vec<Program>, Vec<Participant>) {
        let now = Utc::now();
        let mut program = Program::new("주간보호", now);
        program.id = "g1".to_string();
        let mut participant = Participant::new("김철수", "g1", now);
        participant.id = "p1".to_string();
        (vec![program], vec![participant])
    }

    fn record(participant: &str, d: u32, status: AttendanceStatus, reason: Option<&str>) -> AttendanceRecord {
        AttendanceRecord::new(participant, "g1", date(d), status, reason.map(str::to_string), Utc::now())
    }

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    #[test]
    fn test_summary_counts_statuses() {
        let (programs, participants) = fixtures();
        let records = vec![
            record("p1", 3, AttendanceStatus::Present, None),
            record("p1", 4, AttendanceStatus::Present, None),
            record("p1", 5, AttendanceStatus::Present, None),
            record("p1", 6, AttendanceStatus::Absent, Some("기타")),
        ];

        let workbook = build_workbook(&records, &participants, &programs, &[], &CalendarService::new());
        let summary = workbook.sheet(SUMMARY_SHEET).unwrap();

        assert_eq!(
            summary.body()[0],
            vec![
                text("주간보호"),
                text("김철수"),
                Cell::Number(3.0),
                Cell::Number(1.0),
                Cell::Number(0.0),
                Cell::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_no_journals_gives_two_sheets() {
        let (programs, participants) = fixtures();
        let workbook = build_workbook(&[], &participants, &programs, &[], &CalendarService::new());

        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![LOG_SHEET, SUMMARY_SHEET]);
        assert_eq!(workbook.sheets[0].rows[0][0], text("날짜"));
        assert_eq!(workbook.sheets[0].column_widths, LOG_WIDTHS.to_vec());
    }

    #[test]
    fn test_log_sorted_by_date_with_labels_and_lookups() {
        let (programs, participants) = fixtures();
        let records = vec![
            record("p1", 5, AttendanceStatus::EarlyLeave, Some("병원 방문")),
            record("ghost", 3, AttendanceStatus::from("late"), None),
            record("p1", 4, AttendanceStatus::Present, None),
        ];

        let workbook = build_workbook(&records, &participants, &programs, &[], &CalendarService::new());
        let log = workbook.sheet(LOG_SHEET).unwrap().body();

        assert_eq!(
            log[0],
            vec![text("2024-06-03"), text("월"), text("주간보호"), text(""), text("late"), text("")]
        );
        assert_eq!(log[1][4], text("출석"));
        assert_eq!(log[2][4], text("조퇴"));
        assert_eq!(log[2][5], text("병원 방문"));
    }

    #[test]
    fn test_unknown_status_ignored_in_summary() {
        let (programs, participants) = fixtures();
        let records = vec![record("p1", 3, AttendanceStatus::from("late"), None)];

        let workbook = build_workbook(&records, &participants, &programs, &[], &CalendarService::new());
        let row = &workbook.sheet(SUMMARY_SHEET).unwrap().body()[0];
        assert_eq!(row[5], Cell::Number(0.0));
    }

    #[test]
    fn test_journal_sheet_sorted_with_missing_program() {
        let (programs, participants) = fixtures();
        let journals = vec![
            Journal::new("g1", date(6), "미술", Utc::now()),
            Journal::new("gone", date(2), "산책", Utc::now()),
        ];

        let workbook = build_workbook(&[], &participants, &programs, &journals, &CalendarService::new());
        let sheet = workbook.sheet(JOURNAL_SHEET).unwrap();

        assert_eq!(sheet.column_widths, JOURNAL_WIDTHS.to_vec());
        assert_eq!(sheet.body()[0], vec![text("2024-06-02"), text(""), text("산책")]);
        assert_eq!(sheet.body()[1][1], text("주간보호"));
    }
}
