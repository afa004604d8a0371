//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::backend::domain::errors::DomainError;

fn body(status: StatusCode, error: &str, code: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
        .into_response()
}

pub fn unauthorized() -> Response {
    body(StatusCode::UNAUTHORIZED, "unauthorized", "UNAUTHORIZED")
}

/// Map a domain error to its status code and `{error, code}` body.
/// Persistence failures are logged and reported with a generic message
pub fn error_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(message) => {
            warn!("Rejected request: {}", message);
            body(StatusCode::BAD_REQUEST, &message, "VALIDATION_FAILED")
        }
        DomainError::NotFound(what) => body(StatusCode::NOT_FOUND, &format!("{} not found", what), "NOT_FOUND"),
        DomainError::Unauthorized => unauthorized(),
        DomainError::Persistence(source) => {
            error!("Persistence failure: {:#}", source);
            body(StatusCode::INTERNAL_SERVER_ERROR, "persistence failed", "PERSISTENCE_FAILED")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_persistence_error_body_is_generic() {
        let response = error_response(DomainError::Persistence(anyhow::anyhow!("disk on fire")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "persistence failed");
        assert_eq!(json["code"], "PERSISTENCE_FAILED");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            error_response(DomainError::Validation("bad date".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(error_response(DomainError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(error_response(DomainError::Unauthorized).status(), StatusCode::UNAUTHORIZED);
    }
}
