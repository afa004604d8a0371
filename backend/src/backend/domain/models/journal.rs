//! Domain model for a daily program journal.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Free-text note for one program on one day.
///
/// There is at most one journal per (program_id, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: String,
    pub program_id: String,
    pub date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Journal {
    pub fn new(program_id: &str, date: NaiveDate, content: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            program_id: program_id.to_string(),
            date,
            content: content.to_string(),
            created_at: now,
        }
    }
}
