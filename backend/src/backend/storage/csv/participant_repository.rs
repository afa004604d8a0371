use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::connection::{CsvConnection, PARTICIPANTS_FILE};
use crate::backend::domain::models::participant::{Participant, ParticipantStatus};
use crate::backend::storage::fields::{format_timestamp, optional_text, parse_timestamp};
use crate::backend::storage::traits::ParticipantStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ParticipantRow {
    id: String,
    name: String,
    program_id: String,
    status: String,
    created_at: String,
    ended_at: String,
}

impl ParticipantRow {
    fn from_domain(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
            program_id: participant.program_id.clone(),
            status: participant.status.as_str().to_string(),
            created_at: format_timestamp(participant.created_at),
            ended_at: participant.ended_at.map(format_timestamp).unwrap_or_default(),
        }
    }

    fn into_domain(self) -> Result<Participant> {
        Ok(Participant {
            id: self.id,
            name: self.name,
            program_id: self.program_id,
            status: self.status.parse::<ParticipantStatus>().map_err(anyhow::Error::msg)?,
            created_at: parse_timestamp(&self.created_at)?,
            ended_at: optional_text(&self.ended_at)
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }
}

/// Participants left once a program is gone, not yet written back
pub(super) struct PrunedParticipants {
    kept: Vec<ParticipantRow>,
    pub(super) removed_ids: Vec<String>,
}

impl PrunedParticipants {
    pub(super) fn write(&self, connection: &CsvConnection) -> Result<()> {
        connection.write_rows(PARTICIPANTS_FILE, &self.kept)
    }
}

/// Split off every participant of a program. Nothing is written.
/// The caller must hold the connection lock
pub(super) fn prune_program_participants(connection: &CsvConnection, program_id: &str) -> Result<PrunedParticipants> {
    let rows: Vec<ParticipantRow> = connection.read_rows(PARTICIPANTS_FILE)?;
    let (removed, kept): (Vec<_>, Vec<_>) = rows.into_iter().partition(|row| row.program_id == program_id);
    Ok(PrunedParticipants {
        kept,
        removed_ids: removed.into_iter().map(|row| row.id).collect(),
    })
}

/// CSV-backed participant repository
#[derive(Clone)]
pub struct ParticipantRepository {
    connection: CsvConnection,
}

impl ParticipantRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_participants(&self) -> Result<Vec<ParticipantRow>> {
        self.connection.read_rows(PARTICIPANTS_FILE)
    }
}

#[async_trait]
impl ParticipantStorage for ParticipantRepository {
    async fn store_participant(&self, participant: &Participant) -> Result<()> {
        let _guard = self.connection.lock().await;
        let mut rows = self.read_participants()?;
        rows.push(ParticipantRow::from_domain(participant));
        self.connection.write_rows(PARTICIPANTS_FILE, &rows)
    }

    async fn get_participant(&self, participant_id: &str) -> Result<Option<Participant>> {
        let _guard = self.connection.lock().await;
        self.read_participants()?
            .into_iter()
            .find(|row| row.id == participant_id)
            .map(ParticipantRow::into_domain)
            .transpose()
    }

    async fn list_participants(&self, program_id: Option<&str>) -> Result<Vec<Participant>> {
        let _guard = self.connection.lock().await;
        let mut participants = self
            .read_participants()?
            .into_iter()
            .filter(|row| program_id.map_or(true, |id| row.program_id == id))
            .map(ParticipantRow::into_domain)
            .collect::<Result<Vec<_>>>()?;
        participants.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(participants)
    }

    async fn update_participant(&self, participant: &Participant) -> Result<()> {
        let _guard = self.connection.lock().await;
        let mut rows = self.read_participants()?;
        if let Some(row) = rows.iter_mut().find(|row| row.id == participant.id) {
            *row = ParticipantRow {
                created_at: row.created_at.clone(),
                program_id: row.program_id.clone(),
                ..ParticipantRow::from_domain(participant)
            };
        }
        self.connection.write_rows(PARTICIPANTS_FILE, &rows)
    }
}
