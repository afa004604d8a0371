//! # REST API for Programs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use shared::{CreateProgramRequest, ProgramListResponse};
use tracing::info;

use super::errors::error_response;
use super::mappers::program_mapper::ProgramMapper;
use super::session::AuthorizedSession;
use crate::backend::storage::Connection;
use crate::backend::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/programs", get(list_programs::<C>).post(create_program::<C>))
        .route("/programs/:program_id", delete(delete_program::<C>))
}

pub async fn list_programs<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    info!("GET /api/programs");

    match state.program_service.list_programs().await {
        Ok(programs) => Json(ProgramListResponse {
            programs: programs.into_iter().map(ProgramMapper::to_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a program; a blank name answers 204 and creates nothing
pub async fn create_program<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<CreateProgramRequest>,
) -> impl IntoResponse {
    info!("POST /api/programs - request: {:?}", request);

    match state.program_service.create_program(&request.name).await {
        Ok(Some(program)) => (StatusCode::CREATED, Json(ProgramMapper::to_dto(program))).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_program<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(program_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/programs/{}", program_id);

    match state.program_service.delete_program(&program_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{empty_request, json_request, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_requires_session() {
        let app = TestApp::new().await;
        let response = app.send(empty_request(Method::GET, "/api/programs", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let app = TestApp::new().await;

        let (status, created) = app
            .send_json(json_request(Method::POST, "/api/programs", Some(&app.token), json!({"name": "오후반"})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let program_id = created["id"].as_str().unwrap().to_string();

        let (status, listed) = app
            .send_json(empty_request(Method::GET, "/api/programs", Some(&app.token)))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["programs"][0]["name"], "오후반");
        assert!(listed["programs"][0]["createdAt"].is_string());

        let uri = format!("/api/programs/{}", program_id);
        let response = app.send(empty_request(Method::DELETE, &uri, Some(&app.token))).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.send(empty_request(Method::DELETE, &uri, Some(&app.token))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_name_is_no_content() {
        let app = TestApp::new().await;
        let response = app
            .send(json_request(Method::POST, "/api/programs", Some(&app.token), json!({"name": "  "})))
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
