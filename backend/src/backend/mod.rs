//! # Backend Module
//!
//! Contains all non-UI logic for the attendance tracker.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, spreadsheet export)
//!     ↓
//! Domain Layer (record reconciliation, statistics, export rows, sessions)
//!     ↓
//! Storage Layer (SQLite or CSV files)
//! ```
//!
//! [`AppState`] is generic over the storage [`Connection`]; the binary picks
//! the backend from configuration at startup.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    extract::FromRef,
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::backend::domain::{
    AttendanceService, CalendarService, ExportService, JournalService, ParticipantService,
    ProgramService, SessionService, StatisticsService,
};
use crate::backend::storage::Connection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState<C: Connection> {
    pub program_service: ProgramService<C>,
    pub participant_service: ParticipantService<C>,
    pub attendance_service: AttendanceService<C>,
    pub journal_service: JournalService<C>,
    pub statistics_service: StatisticsService<C>,
    pub export_service: ExportService<C>,
    pub calendar_service: CalendarService,
    pub session_service: SessionService,
}

impl<C: Connection> AppState<C> {
    pub fn new(connection: Arc<C>, password: &str) -> Self {
        let calendar_service = CalendarService::new();

        Self {
            program_service: ProgramService::new(connection.clone()),
            participant_service: ParticipantService::new(connection.clone()),
            attendance_service: AttendanceService::new(connection.clone()),
            journal_service: JournalService::new(connection.clone()),
            statistics_service: StatisticsService::new(connection.clone(), calendar_service.clone()),
            export_service: ExportService::new(connection, calendar_service.clone()),
            calendar_service,
            session_service: SessionService::new(password),
        }
    }
}

impl<C: Connection> FromRef<AppState<C>> for SessionService {
    fn from_ref(state: &AppState<C>) -> Self {
        state.session_service.clone()
    }
}

/// Initialize the application state over an open storage connection
pub fn initialize_backend<C: Connection>(connection: C, password: &str) -> AppState<C> {
    info!("Setting up domain services");
    AppState::new(Arc::new(connection), password)
}

/// Create the Axum router with all routes, CORS and request tracing
pub fn create_router<C: Connection>(app_state: AppState<C>, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin {}", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
