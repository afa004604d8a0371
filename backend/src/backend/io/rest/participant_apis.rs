//! # REST API for Participants
//!
//! Registration and the active/inactive transitions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use shared::{CreateParticipantRequest, ParticipantListResponse};
use tracing::info;

use super::errors::error_response;
use super::mappers::participant_mapper::ParticipantMapper;
use super::session::AuthorizedSession;
use crate::backend::domain::errors::DomainResult;
use crate::backend::storage::Connection;
use crate::backend::AppState;

#[derive(Debug, Deserialize)]
pub struct ParticipantQuery {
    pub status: Option<String>,
}

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/programs/:program_id/participants", get(list_participants::<C>))
        .route("/participants", post(create_participant::<C>))
        .route("/participants/:participant_id/terminate", post(terminate_participant::<C>))
        .route("/participants/:participant_id/reactivate", post(reactivate_participant::<C>))
}

pub async fn list_participants<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(program_id): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> impl IntoResponse {
    info!("GET /api/programs/{}/participants - query: {:?}", program_id, query);

    let result: DomainResult<_> = async {
        let status = query.status.as_deref().map(ParticipantMapper::parse_status).transpose()?;
        state.participant_service.list_participants(&program_id, status).await
    }
    .await;

    match result {
        Ok(participants) => Json(ParticipantListResponse {
            participants: participants.into_iter().map(ParticipantMapper::to_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Register a participant; a blank name answers 204 and creates nothing
pub async fn create_participant<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<CreateParticipantRequest>,
) -> impl IntoResponse {
    info!("POST /api/participants - request: {:?}", request);

    match state
        .participant_service
        .create_participant(&request.name, &request.program_id)
        .await
    {
        Ok(Some(participant)) => {
            (StatusCode::CREATED, Json(ParticipantMapper::to_dto(participant))).into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn terminate_participant<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(participant_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/participants/{}/terminate", participant_id);

    match state.participant_service.terminate(&participant_id).await {
        Ok(participant) => Json(ParticipantMapper::to_dto(participant)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn reactivate_participant<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(participant_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/participants/{}/reactivate", participant_id);

    match state.participant_service.reactivate(&participant_id).await {
        Ok(participant) => Json(ParticipantMapper::to_dto(participant)).into_response(),
        Err(e) => error_response(e),
    }
}
