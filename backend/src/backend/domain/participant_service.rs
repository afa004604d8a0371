//! Participant registration and status transitions.
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{DomainError, DomainResult};
use super::models::participant::{Participant, ParticipantStatus};
use crate::backend::storage::{Connection, ParticipantStorage, ProgramStorage};

#[derive(Clone)]
pub struct ParticipantService<C: Connection> {
    participant_repository: C::ParticipantRepository,
    program_repository: C::ProgramRepository,
}

impl<C: Connection> ParticipantService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            participant_repository: connection.create_participant_repository(),
            program_repository: connection.create_program_repository(),
        }
    }

    /// Register a participant in an existing program.
    /// A blank name is ignored and returns None
    pub async fn create_participant(&self, name: &str, program_id: &str) -> DomainResult<Option<Participant>> {
        let name = name.trim();
        if name.is_empty() {
            info!("Ignoring participant with blank name");
            return Ok(None);
        }
        if self.program_repository.get_program(program_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("program {}", program_id)));
        }

        let participant = Participant::new(name, program_id, Utc::now());
        self.participant_repository.store_participant(&participant).await?;
        info!("Registered participant {} in program {}", participant.id, program_id);
        Ok(Some(participant))
    }

    /// Participants of a program, optionally filtered by status
    pub async fn list_participants(
        &self,
        program_id: &str,
        status: Option<ParticipantStatus>,
    ) -> DomainResult<Vec<Participant>> {
        let participants = self.participant_repository.list_participants(Some(program_id)).await?;
        Ok(participants
            .into_iter()
            .filter(|participant| status.map_or(true, |status| participant.status == status))
            .collect())
    }

    pub async fn terminate(&self, participant_id: &str) -> DomainResult<Participant> {
        let mut participant = self.load(participant_id).await?;
        participant.terminate(Utc::now());
        self.participant_repository.update_participant(&participant).await?;
        info!("Terminated participant {}", participant_id);
        Ok(participant)
    }

    pub async fn reactivate(&self, participant_id: &str) -> DomainResult<Participant> {
        let mut participant = self.load(participant_id).await?;
        participant.reactivate();
        self.participant_repository.update_participant(&participant).await?;
        info!("Reactivated participant {}", participant_id);
        Ok(participant)
    }

    async fn load(&self, participant_id: &str) -> DomainResult<Participant> {
        match self.participant_repository.get_participant(participant_id).await? {
            Some(participant) => Ok(participant),
            None => {
                warn!("Participant not found: {}", participant_id);
                Err(DomainError::NotFound(format!("participant {}", participant_id)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::program_service::ProgramService;
    use crate::backend::storage::DbConnection;

    async fn setup() -> (ParticipantService<DbConnection>, String) {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        let program = ProgramService::new(connection.clone())
            .create_program("주간보호")
            .await
            .unwrap()
            .unwrap();
        (ParticipantService::new(connection), program.id)
    }

    #[tokio::test]
    async fn test_terminate_and_reactivate() {
        let (service, program_id) = setup().await;
        let participant = service.create_participant("김철수", &program_id).await.unwrap().unwrap();

        let terminated = service.terminate(&participant.id).await.unwrap();
        assert_eq!(terminated.status, ParticipantStatus::Inactive);
        assert!(terminated.ended_at.is_some());

        let active = service
            .list_participants(&program_id, Some(ParticipantStatus::Active))
            .await
            .unwrap();
        assert!(active.is_empty());

        let reactivated = service.reactivate(&participant.id).await.unwrap();
        assert_eq!(reactivated.status, ParticipantStatus::Active);
        assert_eq!(reactivated.ended_at, None);
        assert_eq!(service.list_participants(&program_id, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_and_unknown_program() {
        let (service, program_id) = setup().await;
        assert_eq!(service.create_participant(" ", &program_id).await.unwrap(), None);
        assert!(matches!(
            service.create_participant("김철수", "missing").await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_terminate_missing_participant_is_not_found() {
        let (service, _) = setup().await;
        assert!(matches!(service.terminate("nope").await, Err(DomainError::NotFound(_))));
    }
}
