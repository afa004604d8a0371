//! # REST API Interface Layer
//!
//! HTTP endpoints for the attendance tracker. Handlers translate JSON
//! requests into domain calls and domain errors into status codes; they hold no
//! business rules of their own.
//!
//! Every route except login takes an [`AuthorizedSession`], so an
//! unauthenticated request is rejected before the handler runs.

pub mod attendance_apis;
pub mod errors;
pub mod export_apis;
pub mod journal_apis;
pub mod mappers;
pub mod participant_apis;
pub mod program_apis;
pub mod session;
pub mod session_apis;
pub mod stats_apis;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;

use crate::backend::storage::Connection;
use crate::backend::AppState;

pub use errors::error_response;
pub use session::AuthorizedSession;

/// All API routes, to be nested under `/api`
pub fn api_router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .merge(session_apis::router())
        .merge(program_apis::router())
        .merge(participant_apis::router())
        .merge(attendance_apis::router())
        .merge(journal_apis::router())
        .merge(stats_apis::router())
        .merge(export_apis::router())
}
