use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, JOURNALS_FILE};
use crate::backend::domain::models::journal::Journal;
use crate::backend::storage::fields::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::backend::storage::traits::JournalStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JournalRow {
    id: String,
    program_id: String,
    date: String,
    content: String,
    created_at: String,
}

impl JournalRow {
    fn from_domain(journal: &Journal) -> Self {
        Self {
            id: journal.id.clone(),
            program_id: journal.program_id.clone(),
            date: format_date(journal.date),
            content: journal.content.clone(),
            created_at: format_timestamp(journal.created_at),
        }
    }

    fn into_domain(self) -> Result<Journal> {
        Ok(Journal {
            id: self.id,
            program_id: self.program_id,
            date: parse_date(&self.date)?,
            content: self.content,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

pub(super) struct PrunedJournals {
    kept: Vec<JournalRow>,
    pub(super) removed: usize,
}

impl PrunedJournals {
    pub(super) fn write(&self, connection: &CsvConnection) -> Result<()> {
        connection.write_rows(JOURNALS_FILE, &self.kept)
    }
}

/// Nothing is written. The caller must hold the connection lock
pub(super) fn prune_program_journals(connection: &CsvConnection, program_id: &str) -> Result<PrunedJournals> {
    let rows: Vec<JournalRow> = connection.read_rows(JOURNALS_FILE)?;
    let before = rows.len();
    let kept: Vec<JournalRow> = rows.into_iter().filter(|row| row.program_id != program_id).collect();
    let removed = before - kept.len();
    Ok(PrunedJournals { kept, removed })
}

#[derive(Clone)]
pub struct JournalRepository {
    connection: CsvConnection,
}

impl JournalRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_journals(&self) -> Result<Vec<JournalRow>> {
        self.connection.read_rows(JOURNALS_FILE)
    }
}

#[async_trait]
impl JournalStorage for JournalRepository {
    async fn upsert_journal(&self, journal: &Journal) -> Result<Journal> {
        let _guard = self.connection.lock().await;
        let mut rows = self.read_journals()?;
        let incoming = JournalRow::from_domain(journal);

        let stored = match rows
            .iter_mut()
            .find(|row| row.program_id == incoming.program_id && row.date == incoming.date)
        {
            Some(existing) => {
                existing.content = incoming.content;
                existing.clone()
            }
            None => {
                rows.push(incoming.clone());
                incoming
            }
        };

        self.connection.write_rows(JOURNALS_FILE, &rows)?;
        stored.into_domain()
    }

    async fn get_journal(&self, program_id: &str, date: NaiveDate) -> Result<Option<Journal>> {
        let _guard = self.connection.lock().await;
        let date = format_date(date);
        self.read_journals()?
            .into_iter()
            .find(|row| row.program_id == program_id && row.date == date)
            .map(JournalRow::into_domain)
            .transpose()
    }

    async fn list_journals(&self, program_id: Option<&str>) -> Result<Vec<Journal>> {
        let _guard = self.connection.lock().await;
        let mut journals = self
            .read_journals()?
            .into_iter()
            .filter(|row| program_id.map_or(true, |id| row.program_id == id))
            .map(JournalRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        journals.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(journals)
    }
}
