//! # REST API for Journals

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{JournalListResponse, SaveJournalRequest};
use tracing::info;

use super::errors::error_response;
use super::mappers::journal_mapper::JournalMapper;
use super::mappers::parse_request_date;
use super::session::AuthorizedSession;
use crate::backend::domain::errors::DomainError;
use crate::backend::storage::Connection;
use crate::backend::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/programs/:program_id/journals", get(list_journals::<C>))
        .route(
            "/programs/:program_id/journals/:date",
            get(get_journal::<C>).put(save_journal::<C>),
        )
}

pub async fn get_journal<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path((program_id, date)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/programs/{}/journals/{}", program_id, date);

    let date = match parse_request_date(&date) {
        Ok(date) => date,
        Err(e) => return error_response(e),
    };

    match state.journal_service.get_journal(&program_id, date).await {
        Ok(Some(journal)) => Json(JournalMapper::to_dto(journal)).into_response(),
        Ok(None) => error_response(DomainError::NotFound(format!("journal {} {}", program_id, date))),
        Err(e) => error_response(e),
    }
}

pub async fn save_journal<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path((program_id, date)): Path<(String, String)>,
    Json(request): Json<SaveJournalRequest>,
) -> impl IntoResponse {
    info!("PUT /api/programs/{}/journals/{}", program_id, date);

    let date = match parse_request_date(&date) {
        Ok(date) => date,
        Err(e) => return error_response(e),
    };

    match state.journal_service.save_journal(&program_id, date, &request.content).await {
        Ok(journal) => Json(JournalMapper::to_dto(journal)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_journals<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(program_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/programs/{}/journals", program_id);

    match state.journal_service.list_journals(Some(&program_id)).await {
        Ok(journals) => Json(JournalListResponse {
            journals: journals.into_iter().map(JournalMapper::to_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
