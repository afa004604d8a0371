//! Domain model for a program.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organizational grouping of participants (a class or a course).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn new(name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: now,
        }
    }
}
