//! # REST API for Spreadsheet Export
//!
//! Builds the attendance workbook for one program (or all programs) and
//! returns it as an `.xlsx` download.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::ExportRequest;
use tracing::info;

use super::errors::error_response;
use super::session::AuthorizedSession;
use crate::backend::domain::errors::DomainError;
use crate::backend::io::spreadsheet::{encode_xlsx, XLSX_CONTENT_TYPE};
use crate::backend::storage::Connection;
use crate::backend::AppState;

/// RFC 5987 attr-chars that may stay unencoded
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

pub fn router<C: Connection>() -> Router<AppState<C>> {
    Router::new().route("/export", post(export_workbook::<C>))
}

/// `Content-Disposition` with an ASCII fallback and the Korean UTF-8 name
pub fn content_disposition(today: NaiveDate) -> String {
    let date = today.format("%Y-%m-%d");
    let localized = format!("아르딤_출석부_{}.xlsx", date);
    format!(
        "attachment; filename=\"attendance_{}.xlsx\"; filename*=UTF-8''{}",
        date,
        utf8_percent_encode(&localized, FILENAME_ENCODE_SET)
    )
}

pub async fn export_workbook<C: Connection>(
    _session: AuthorizedSession,
    State(state): State<AppState<C>>,
    Json(request): Json<ExportRequest>,
) -> impl IntoResponse {
    info!("POST /api/export - request: {:?}", request);

    let workbook = match state.export_service.export_workbook(request.program_id.as_deref()).await {
        Ok(workbook) => workbook,
        Err(e) => return error_response(e),
    };

    match encode_xlsx(&workbook) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, content_disposition(Local::now().date_naive())),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(DomainError::Persistence(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{json_request, TestApp};
    use super::*;
    use axum::body::to_bytes;
    use axum::http::Method;
    use serde_json::json;

    #[test]
    fn test_content_disposition() {
        let value = content_disposition(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(
            value,
            "attachment; filename=\"attendance_2024-06-03.xlsx\"; \
             filename*=UTF-8''%EC%95%84%EB%A5%B4%EB%94%A4_%EC%B6%9C%EC%84%9D%EB%B6%80_2024-06-03.xlsx"
        );
    }

    #[tokio::test]
    async fn test_export_download() {
        let app = TestApp::new().await;

        let response = app
            .send(json_request(Method::POST, "/api/export", Some(&app.token), json!({})))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_CONTENT_TYPE);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"attendance_"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
