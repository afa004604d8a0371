use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::backend::domain::models::participant::{Participant, ParticipantStatus};
use crate::backend::storage::fields::{format_timestamp, parse_timestamp};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::ParticipantStorage;

/// Repository for participant operations
#[derive(Clone)]
pub struct ParticipantRepository {
    db: DbConnection,
}

impl ParticipantRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_participant(row: &SqliteRow) -> Result<Participant> {
        let status: String = row.get("status");
        let ended_at: Option<String> = row.get("ended_at");

        Ok(Participant {
            id: row.get("id"),
            name: row.get("name"),
            program_id: row.get("program_id"),
            status: status.parse::<ParticipantStatus>().map_err(anyhow::Error::msg)?,
            created_at: parse_timestamp(row.get::<&str, _>("created_at"))?,
            ended_at: ended_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

#[async_trait]
impl ParticipantStorage for ParticipantRepository {
    async fn store_participant(&self, participant: &Participant) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO participants (id, name, program_id, status, created_at, ended_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&participant.id)
        .bind(&participant.name)
        .bind(&participant.program_id)
        .bind(participant.status.as_str())
        .bind(format_timestamp(participant.created_at))
        .bind(participant.ended_at.map(format_timestamp))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_participant(&self, participant_id: &str) -> Result<Option<Participant>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, program_id, status, created_at, ended_at
            FROM participants
            WHERE id = ?
            "#,
        )
        .bind(participant_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_participant).transpose()
    }

    async fn list_participants(&self, program_id: Option<&str>) -> Result<Vec<Participant>> {
        let rows = match program_id {
            Some(program_id) => {
                sqlx::query(
                    r#"
                    SELECT id, name, program_id, status, created_at, ended_at
                    FROM participants
                    WHERE program_id = ?
                    ORDER BY created_at ASC, rowid ASC
                    "#,
                )
                .bind(program_id)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, name, program_id, status, created_at, ended_at
                    FROM participants
                    ORDER BY created_at ASC, rowid ASC
                    "#,
                )
                .fetch_all(self.db.pool())
                .await?
            }
        };

        rows.iter().map(Self::row_to_participant).collect()
    }

    async fn update_participant(&self, participant: &Participant) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE participants
            SET name = ?, status = ?, ended_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&participant.name)
        .bind(participant.status.as_str())
        .bind(participant.ended_at.map(format_timestamp))
        .bind(&participant.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_status_transitions_persist() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ParticipantRepository::new(db);

        let now = Utc::now();
        let mut participant = Participant::new("홍길동", "program-1", now);
        repo.store_participant(&participant).await.unwrap();

        participant.terminate(now);
        repo.update_participant(&participant).await.unwrap();
        let stored = repo.get_participant(&participant.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ParticipantStatus::Inactive);
        assert!(stored.ended_at.is_some());

        participant.reactivate();
        repo.update_participant(&participant).await.unwrap();
        let stored = repo.get_participant(&participant.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ParticipantStatus::Active);
        assert_eq!(stored.ended_at, None);
    }

    #[tokio::test]
    async fn test_list_filters_by_program() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = ParticipantRepository::new(db);

        let now = Utc::now();
        repo.store_participant(&Participant::new("A", "program-1", now)).await.unwrap();
        repo.store_participant(&Participant::new("B", "program-2", now)).await.unwrap();

        assert_eq!(repo.list_participants(Some("program-1")).await.unwrap().len(), 1);
        assert_eq!(repo.list_participants(None).await.unwrap().len(), 2);
    }
}
