//! # REST API for Sessions
//!
//! Login, logout and password change.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{post, put},
    Router,
};
use shared::{ChangePasswordRequest, LoginRequest, LoginResponse};
use tracing::info;

use super::errors::error_response;
use super::session::{expired_session_cookie, session_cookie, AuthorizedSession};
use crate::backend::storage::Connection;
use crate::backend::AppState;

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/session/login", post(login::<C>))
        .route("/session/logout", post(logout::<C>))
        .route("/session/password", put(change_password::<C>))
}

/// Exchange the password for a session token, also set as a cookie
pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/session/login");

    match state.session_service.login(&request.password).await {
        Ok(token) => (
            StatusCode::OK,
            [(header::SET_COOKIE, session_cookie(&token))],
            Json(LoginResponse { token }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn logout<C: Connection>(
    session: AuthorizedSession,
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    info!("POST /api/session/logout");

    state.session_service.logout(&session.token).await;
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, expired_session_cookie())]).into_response()
}

pub async fn change_password<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    info!("PUT /api/session/password");

    match state
        .session_service
        .change_password(&request.current_password, &request.new_password)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
