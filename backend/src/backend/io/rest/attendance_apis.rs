//! # REST API for Attendance
//!
//! The tri-state mark, explicit upsert and removal, reason updates and the
//! per-day listing used by the attendance sheet.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use shared::{
    AttendanceListResponse, MarkAttendanceRequest, QuickReasonsResponse, UpdateReasonRequest,
    UpsertAttendanceRequest,
};
use tracing::info;

use super::errors::error_response;
use super::mappers::attendance_mapper::AttendanceMapper;
use super::mappers::parse_request_date;
use super::session::AuthorizedSession;
use crate::backend::domain::errors::DomainResult;
use crate::backend::domain::models::attendance::QUICK_REASONS;
use crate::backend::storage::Connection;
use crate::backend::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveAttendanceQuery {
    pub participant_id: String,
    pub date: String,
}

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/programs/:program_id/attendance", get(list_attendance::<C>))
        .route("/attendance/mark", post(mark_attendance::<C>))
        .route(
            "/attendance",
            put(upsert_attendance::<C>).delete(remove_attendance::<C>),
        )
        .route("/attendance/reason", put(update_reason::<C>))
        .route("/attendance/reasons", get(quick_reasons))
}

/// Records of a program on one day, or all of its records without `date`
pub async fn list_attendance<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(program_id): Path<String>,
    Query(query): Query<DateQuery>,
) -> impl IntoResponse {
    info!("GET /api/programs/{}/attendance - query: {:?}", program_id, query);

    let result: DomainResult<_> = async {
        match query.date.as_deref() {
            Some(date) => {
                let date = parse_request_date(date)?;
                state.attendance_service.records_for_date(&program_id, date).await
            }
            None => state.attendance_service.records_for_program(Some(&program_id)).await,
        }
    }
    .await;

    match result {
        Ok(records) => Json(AttendanceListResponse {
            records: records.into_iter().map(AttendanceMapper::to_dto).collect(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// One tap of the tri-state control
pub async fn mark_attendance<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance/mark - request: {:?}", request);

    let entry = match AttendanceMapper::mark_to_entry(request) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };

    match state.attendance_service.mark(entry).await {
        Ok(outcome) => Json(AttendanceMapper::to_mark_response(outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn upsert_attendance<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<UpsertAttendanceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/attendance - request: {:?}", request);

    let entry = match AttendanceMapper::upsert_to_entry(request) {
        Ok(entry) => entry,
        Err(e) => return error_response(e),
    };

    match state.attendance_service.upsert(entry).await {
        Ok(record) => Json(AttendanceMapper::to_dto(record)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn remove_attendance<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Query(query): Query<RemoveAttendanceQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/attendance - query: {:?}", query);

    let date = match parse_request_date(&query.date) {
        Ok(date) => date,
        Err(e) => return error_response(e),
    };

    match state.attendance_service.remove(&query.participant_id, date).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Re-save an absent or early-leave record with a new reason; 204 when there is none
pub async fn update_reason<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<UpdateReasonRequest>,
) -> impl IntoResponse {
    info!("PUT /api/attendance/reason - request: {:?}", request);

    let date = match parse_request_date(&request.date) {
        Ok(date) => date,
        Err(e) => return error_response(e),
    };

    match state
        .attendance_service
        .update_reason(&request.participant_id, &request.program_id, date, &request.reason)
        .await
    {
        Ok(Some(record)) => Json(AttendanceMapper::to_dto(record)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn quick_reasons(_session: AuthorizedSession) -> impl IntoResponse {
    info!("GET /api/attendance/reasons");

    Json(QuickReasonsResponse {
        reasons: QUICK_REASONS.iter().map(|reason| reason.to_string()).collect(),
    })
}
