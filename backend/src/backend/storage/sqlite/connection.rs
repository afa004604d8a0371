use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::repositories::{
    AttendanceRepository, JournalRepository, ParticipantRepository, ProgramRepository,
};
use crate::backend::storage::traits::Connection;

/// DbConnection owns the SQLite pool shared by all repositories
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and set up the schema
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database {}", url);
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database {}", url))?;
        }

        // Connect to the database
        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Open a private in-memory database, used by tests
    pub async fn init_test() -> Result<Self> {
        // Unique name so parallel tests never share a database
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS participants (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                program_id TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                ended_at TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // One row per participant per day
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance (
                id TEXT PRIMARY KEY,
                participant_id TEXT NOT NULL,
                program_id TEXT NOT NULL,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                reason TEXT,
                created_at TEXT NOT NULL,
                UNIQUE (participant_id, date)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_attendance_program_date
            ON attendance(program_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journals (
                id TEXT PRIMARY KEY,
                program_id TEXT NOT NULL,
                date TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (program_id, date)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type ProgramRepository = ProgramRepository;
    type ParticipantRepository = ParticipantRepository;
    type AttendanceRepository = AttendanceRepository;
    type JournalRepository = JournalRepository;

    fn create_program_repository(&self) -> Self::ProgramRepository {
        ProgramRepository::new(self.clone())
    }

    fn create_participant_repository(&self) -> Self::ParticipantRepository {
        ParticipantRepository::new(self.clone())
    }

    fn create_attendance_repository(&self) -> Self::AttendanceRepository {
        AttendanceRepository::new(self.clone())
    }

    fn create_journal_repository(&self) -> Self::JournalRepository {
        JournalRepository::new(self.clone())
    }
}
