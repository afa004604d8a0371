//! Domain model for a participant.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enrollment state of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Active,
    Inactive,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Active => "active",
            ParticipantStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ParticipantStatus::Active),
            "inactive" => Ok(ParticipantStatus::Inactive),
            other => Err(format!("Unknown participant status: {}", other)),
        }
    }
}

/// A person tracked for attendance within exactly one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub program_id: String,
    pub status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn new(name: &str, program_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            program_id: program_id.to_string(),
            status: ParticipantStatus::Active,
            created_at: now,
            ended_at: None,
        }
    }

    /// active -> inactive, stamping the end time
    pub fn terminate(&mut self, now: DateTime<Utc>) {
        self.status = ParticipantStatus::Inactive;
        self.ended_at = Some(now);
    }

    /// inactive -> active, clearing the end time
    pub fn reactivate(&mut self) {
        self.status = ParticipantStatus::Active;
        self.ended_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.status == ParticipantStatus::Active
    }
}
