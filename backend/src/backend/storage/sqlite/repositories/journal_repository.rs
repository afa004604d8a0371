use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::backend::domain::models::journal::Journal;
use crate::backend::storage::fields::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::JournalStorage;

/// Repository for program journals
#[derive(Clone)]
pub struct JournalRepository {
    db: DbConnection,
}

impl JournalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_journal(row: &SqliteRow) -> Result<Journal> {
        Ok(Journal {
            id: row.get("id"),
            program_id: row.get("program_id"),
            date: parse_date(row.get::<&str, _>("date"))?,
            content: row.get("content"),
            created_at: parse_timestamp(row.get::<&str, _>("created_at"))?,
        })
    }
}

#[async_trait]
impl JournalStorage for JournalRepository {
    async fn upsert_journal(&self, journal: &Journal) -> Result<Journal> {
        sqlx::query(
            r#"
            INSERT INTO journals (id, program_id, date, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (program_id, date) DO UPDATE SET
                content = excluded.content
            "#,
        )
        .bind(&journal.id)
        .bind(&journal.program_id)
        .bind(format_date(journal.date))
        .bind(&journal.content)
        .bind(format_timestamp(journal.created_at))
        .execute(self.db.pool())
        .await?;

        self.get_journal(&journal.program_id, journal.date)
            .await?
            .ok_or_else(|| anyhow!("Journal vanished after upsert"))
    }

    async fn get_journal(&self, program_id: &str, date: NaiveDate) -> Result<Option<Journal>> {
        let row = sqlx::query(
            r#"
            SELECT id, program_id, date, content, created_at
            FROM journals
            WHERE program_id = ? AND date = ?
            "#,
        )
        .bind(program_id)
        .bind(format_date(date))
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_journal).transpose()
    }

    async fn list_journals(&self, program_id: Option<&str>) -> Result<Vec<Journal>> {
        let rows = match program_id {
            Some(program_id) => {
                sqlx::query(
                    r#"
                    SELECT id, program_id, date, content, created_at
                    FROM journals
                    WHERE program_id = ?
                    ORDER BY date ASC
                    "#,
                )
                .bind(program_id)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, program_id, date, content, created_at
                    FROM journals
                    ORDER BY date ASC
                    "#,
                )
                .fetch_all(self.db.pool())
                .await?
            }
        };

        rows.iter().map(Self::row_to_journal).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_second_save_overwrites_content_in_place() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = JournalRepository::new(db);

        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let first = repo
            .upsert_journal(&Journal::new("g1", date, "첫 기록", Utc::now()))
            .await
            .unwrap();
        let second = repo
            .upsert_journal(&Journal::new("g1", date, "수정된 기록", Utc::now()))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.content, "수정된 기록");
        assert_eq!(repo.list_journals(Some("g1")).await.unwrap().len(), 1);
    }
}
