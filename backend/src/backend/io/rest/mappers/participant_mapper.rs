use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::participant::{
    Participant as DomainParticipant, ParticipantStatus,
};
use crate::backend::storage::fields::format_timestamp;
use shared::Participant as SharedParticipant;

/// Mapper to convert domain participants to shared DTOs.
pub struct ParticipantMapper;

impl ParticipantMapper {
    pub fn to_dto(domain: DomainParticipant) -> SharedParticipant {
        SharedParticipant {
            id: domain.id,
            name: domain.name,
            program_id: domain.program_id,
            status: domain.status.as_str().to_string(),
            created_at: format_timestamp(domain.created_at),
            ended_at: domain.ended_at.map(format_timestamp),
        }
    }

    /// Parse a `status` filter from a query string
    pub fn parse_status(value: &str) -> DomainResult<ParticipantStatus> {
        value.parse::<ParticipantStatus>().map_err(DomainError::Validation)
    }
}
