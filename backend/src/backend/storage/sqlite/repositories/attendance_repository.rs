use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use crate::backend::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::backend::storage::fields::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::AttendanceStorage;

const RECORD_COLUMNS: &str = "id, participant_id, program_id, date, status, reason, created_at";

/// Repository for attendance records
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_record(row: &SqliteRow) -> Result<AttendanceRecord> {
        let status: String = row.get("status");

        Ok(AttendanceRecord {
            id: row.get("id"),
            participant_id: row.get("participant_id"),
            program_id: row.get("program_id"),
            date: parse_date(row.get::<&str, _>("date"))?,
            status: AttendanceStatus::from(status),
            reason: row.get("reason"),
            created_at: parse_timestamp(row.get::<&str, _>("created_at"))?,
        })
    }
}

#[async_trait]
impl AttendanceStorage for AttendanceRepository {
    async fn upsert_record(&self, record: &AttendanceRecord) -> Result<AttendanceRecord> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, participant_id, program_id, date, status, reason, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (participant_id, date) DO UPDATE SET
                program_id = excluded.program_id,
                status = excluded.status,
                reason = excluded.reason
            "#,
        )
        .bind(&record.id)
        .bind(&record.participant_id)
        .bind(&record.program_id)
        .bind(format_date(record.date))
        .bind(record.status.as_str())
        .bind(&record.reason)
        .bind(format_timestamp(record.created_at))
        .execute(self.db.pool())
        .await?;

        debug!(
            "Upserted attendance for {} on {}: {}",
            record.participant_id, record.date, record.status
        );

        self.get_record(&record.participant_id, record.date)
            .await?
            .ok_or_else(|| anyhow!("Attendance record vanished after upsert"))
    }

    async fn delete_record(&self, participant_id: &str, date: NaiveDate) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE participant_id = ? AND date = ?")
            .bind(participant_id)
            .bind(format_date(date))
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_record(&self, participant_id: &str, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM attendance WHERE participant_id = ? AND date = ?",
            RECORD_COLUMNS
        ))
        .bind(participant_id)
        .bind(format_date(date))
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn list_records_by_date(&self, program_id: &str, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM attendance WHERE program_id = ? AND date = ? ORDER BY rowid ASC",
            RECORD_COLUMNS
        ))
        .bind(program_id)
        .bind(format_date(date))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn list_records(&self, program_id: Option<&str>) -> Result<Vec<AttendanceRecord>> {
        let rows = match program_id {
            Some(program_id) => {
                sqlx::query(&format!(
                    "SELECT {} FROM attendance WHERE program_id = ? ORDER BY date ASC, rowid ASC",
                    RECORD_COLUMNS
                ))
                .bind(program_id)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM attendance ORDER BY date ASC, rowid ASC",
                    RECORD_COLUMNS
                ))
                .fetch_all(self.db.pool())
                .await?
            }
        };

        rows.iter().map(Self::row_to_record).collect()
    }
}
