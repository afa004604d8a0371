//! # REST API for Statistics and Date Windows

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use super::errors::error_response;
use super::mappers::parse_request_date;
use super::mappers::stats_mapper::StatsMapper;
use super::session::AuthorizedSession;
use crate::backend::domain::errors::DomainResult;
use crate::backend::storage::Connection;
use crate::backend::AppState;

#[derive(Debug, Deserialize)]
pub struct AnchorQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new()
        .route("/programs/:program_id/stats", get(program_dashboard::<C>))
        .route("/stats/week", get(week_window::<C>))
        .route("/stats/month", get(month_window::<C>))
}

/// The anchor date, today when absent
fn anchor_date(query: &AnchorQuery) -> DomainResult<NaiveDate> {
    match query.date.as_deref() {
        Some(date) => parse_request_date(date),
        None => Ok(Local::now().date_naive()),
    }
}

pub async fn program_dashboard<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Path(program_id): Path<String>,
    Query(query): Query<AnchorQuery>,
) -> impl IntoResponse {
    info!("GET /api/programs/{}/stats - query: {:?}", program_id, query);

    let anchor = match anchor_date(&query) {
        Ok(anchor) => anchor,
        Err(e) => return error_response(e),
    };

    match state.statistics_service.program_dashboard(&program_id, anchor).await {
        Ok(dashboard) => Json(StatsMapper::dashboard_to_dto(dashboard)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn week_window<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Query(query): Query<AnchorQuery>,
) -> impl IntoResponse {
    info!("GET /api/stats/week - query: {:?}", query);

    match anchor_date(&query) {
        Ok(anchor) => Json(StatsMapper::window_to_dto(state.calendar_service.week_of(anchor))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn month_window<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/stats/month - query: {:?}", query);

    match state.calendar_service.month_of(query.year, query.month) {
        Ok(dates) => Json(StatsMapper::window_to_dto(dates)).into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{empty_request, json_request, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_dashboard_counts() {
        let app = TestApp::new().await;
        for (participant, date) in [("A", "2024-06-03"), ("A", "2024-06-04"), ("B", "2024-06-03")] {
            app.send(json_request(
                Method::PUT,
                "/api/attendance",
                Some(&app.token),
                json!({"participantId": participant, "programId": "g1", "date": date, "status": "present"}),
            ))
            .await;
        }

        let (status, body) = app
            .send_json(empty_request(Method::GET, "/api/programs/g1/stats?date=2024-06-05", Some(&app.token)))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weekly"]["weekLabel"], "06-03 ~ 06-09");
        assert_eq!(body["weekly"]["actualCount"], 2);
        assert_eq!(body["weekly"]["totalCount"], 3);
        assert_eq!(body["monthly"]["monthLabel"], "2024년 6월");
    }

    #[tokio::test]
    async fn test_windows() {
        let app = TestApp::new().await;

        let (_, week) = app
            .send_json(empty_request(Method::GET, "/api/stats/week?date=2024-12-31", Some(&app.token)))
            .await;
        assert_eq!(week["dates"][0], "2024-12-30");
        assert_eq!(week["dates"][6], "2025-01-05");

        let (_, month) = app
            .send_json(empty_request(Method::GET, "/api/stats/month?year=2024&month=2", Some(&app.token)))
            .await;
        assert_eq!(month["dates"].as_array().unwrap().len(), 29);

        let response = app
            .send(empty_request(Method::GET, "/api/stats/month?year=2024&month=13", Some(&app.token)))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
