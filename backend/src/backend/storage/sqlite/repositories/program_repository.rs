use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use crate::backend::domain::models::program::Program;
use crate::backend::storage::fields::{format_timestamp, parse_timestamp};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::ProgramStorage;

/// Repository for program operations
#[derive(Clone)]
pub struct ProgramRepository {
    db: DbConnection,
}

impl ProgramRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_program(row: &SqliteRow) -> Result<Program> {
        Ok(Program {
            id: row.get("id"),
            name: row.get("name"),
            created_at: parse_timestamp(row.get::<&str, _>("created_at"))?,
        })
    }
}

#[async_trait]
impl ProgramStorage for ProgramRepository {
    async fn store_program(&self, program: &Program) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO programs (id, name, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&program.id)
        .bind(&program.name)
        .bind(format_timestamp(program.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_program(&self, program_id: &str) -> Result<Option<Program>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM programs
            WHERE id = ?
            "#,
        )
        .bind(program_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_program).transpose()
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM programs
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_program).collect()
    }

    async fn delete_program(&self, program_id: &str) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            DELETE FROM attendance
            WHERE program_id = ?
               OR participant_id IN (SELECT id FROM participants WHERE program_id = ?)
            "#,
        )
        .bind(program_id)
        .bind(program_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM journals WHERE program_id = ?")
            .bind(program_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM participants WHERE program_id = ?")
            .bind(program_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM programs WHERE id = ?")
            .bind(program_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("Deleted program {} ({} rows)", program_id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}
