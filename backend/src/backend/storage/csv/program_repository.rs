use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::connection::{CsvConnection, PROGRAMS_FILE};
use super::{attendance_repository, journal_repository, participant_repository};
use crate::backend::domain::models::program::Program;
use crate::backend::storage::fields::{format_timestamp, parse_timestamp};
use crate::backend::storage::traits::ProgramStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProgramRow {
    id: String,
    name: String,
    created_at: String,
}

impl ProgramRow {
    fn from_domain(program: &Program) -> Self {
        Self {
            id: program.id.clone(),
            name: program.name.clone(),
            created_at: format_timestamp(program.created_at),
        }
    }

    fn into_domain(self) -> Result<Program> {
        Ok(Program {
            id: self.id,
            name: self.name,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// CSV-backed program repository
#[derive(Clone)]
pub struct ProgramRepository {
    connection: CsvConnection,
}

impl ProgramRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_programs(&self) -> Result<Vec<ProgramRow>> {
        self.connection.read_rows(PROGRAMS_FILE)
    }
}

#[async_trait]
impl ProgramStorage for ProgramRepository {
    async fn store_program(&self, program: &Program) -> Result<()> {
        let _guard = self.connection.lock().await;
        let mut rows = self.read_programs()?;
        rows.push(ProgramRow::from_domain(program));
        self.connection.write_rows(PROGRAMS_FILE, &rows)
    }

    async fn get_program(&self, program_id: &str) -> Result<Option<Program>> {
        let _guard = self.connection.lock().await;
        self.read_programs()?
            .into_iter()
            .find(|row| row.id == program_id)
            .map(ProgramRow::into_domain)
            .transpose()
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        let _guard = self.connection.lock().await;
        let mut programs = self
            .read_programs()?
            .into_iter()
            .map(ProgramRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        programs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(programs)
    }

    async fn delete_program(&self, program_id: &str) -> Result<bool> {
        let _guard = self.connection.lock().await;

        // Read and filter every file before touching any of them
        let participants = participant_repository::prune_program_participants(&self.connection, program_id)?;
        let records = attendance_repository::prune_program_records(
            &self.connection,
            program_id,
            &participants.removed_ids,
        )?;
        let journals = journal_repository::prune_program_journals(&self.connection, program_id)?;

        let mut rows = self.read_programs()?;
        let before = rows.len();
        rows.retain(|row| row.id != program_id);
        let existed = rows.len() != before;

        // Children first, the program row last
        records.write(&self.connection)?;
        journals.write(&self.connection)?;
        participants.write(&self.connection)?;
        self.connection.write_rows(PROGRAMS_FILE, &rows)?;

        info!(
            "Deleted program {}: {} participants, {} records, {} journals",
            program_id,
            participants.removed_ids.len(),
            records.removed,
            journals.removed
        );
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::participant::Participant;
    use crate::backend::storage::csv::connection::ATTENDANCE_FILE;
    use crate::backend::storage::csv::test_utils::TestHelper;
    use crate::backend::storage::traits::ParticipantStorage;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_programs_listed_oldest_first() {
        let helper = TestHelper::new().expect("Failed to create test helper");
        let now = Utc::now();

        let later = Program::new("나중", now + Duration::seconds(5));
        let earlier = Program::new("먼저", now);
        helper.program_repo.store_program(&later).await.unwrap();
        helper.program_repo.store_program(&earlier).await.unwrap();

        let programs = helper.program_repo.list_programs().await.unwrap();
        let names: Vec<&str> = programs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["먼저", "나중"]);
    }

    #[tokio::test]
    async fn test_delete_with_unreadable_attendance_changes_nothing() {
        let helper = TestHelper::new().expect("Failed to create test helper");
        let now = Utc::now();

        let program = Program::new("주간반", now);
        helper.program_repo.store_program(&program).await.unwrap();
        let participant = Participant::new("김철수", &program.id, now);
        helper.participant_repo.store_participant(&participant).await.unwrap();

        std::fs::write(helper.env.connection.file_path(ATTENDANCE_FILE), "garbage\nx\n").unwrap();

        assert!(helper.program_repo.delete_program(&program.id).await.is_err());
        assert!(helper.program_repo.get_program(&program.id).await.unwrap().is_some());
        assert!(helper
            .participant_repo
            .get_participant(&participant.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_program_returns_false() {
        let helper = TestHelper::new().expect("Failed to create test helper");
        assert!(!helper.program_repo.delete_program("nope").await.unwrap());
    }
}
