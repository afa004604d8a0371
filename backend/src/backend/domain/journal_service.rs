//! Daily program journals. One journal per program per day; saving again
//! overwrites the content.
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

use super::errors::DomainResult;
use super::models::journal::Journal;
use crate::backend::storage::{Connection, JournalStorage};

#[derive(Clone)]
pub struct JournalService<C: Connection> {
    journal_repository: C::JournalRepository,
}

impl<C: Connection> JournalService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            journal_repository: connection.create_journal_repository(),
        }
    }

    pub async fn get_journal(&self, program_id: &str, date: NaiveDate) -> DomainResult<Option<Journal>> {
        Ok(self.journal_repository.get_journal(program_id, date).await?)
    }

    pub async fn save_journal(&self, program_id: &str, date: NaiveDate, content: &str) -> DomainResult<Journal> {
        let journal = Journal::new(program_id, date, content, Utc::now());
        let stored = self.journal_repository.upsert_journal(&journal).await?;
        info!("Saved journal {} for program {} on {}", stored.id, program_id, date);
        Ok(stored)
    }

    pub async fn list_journals(&self, program_id: Option<&str>) -> DomainResult<Vec<Journal>> {
        Ok(self.journal_repository.list_journals(program_id).await?)
    }
}
