//! The authorized-session extractor.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
    response::Response,
};

use super::errors::unauthorized;
use crate::backend::domain::session_service::SessionService;

pub const SESSION_COOKIE: &str = "session_id";

/// Proof that the request carries a live session token.
///
/// The token is read from `Authorization: Bearer <token>` or the `session_id`
/// cookie. Extraction fails with 401 when neither names a live session.
#[derive(Debug, Clone)]
pub struct AuthorizedSession {
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedSession
where
    SessionService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionService::from_ref(state);

        let token = extract_token(parts).ok_or_else(unauthorized)?;

        if sessions.is_valid(&token).await {
            Ok(AuthorizedSession { token })
        } else {
            Err(unauthorized())
        }
    }
}

fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());

    bearer.or_else(|| {
        parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(str::to_string)
            })
    })
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// `Set-Cookie` value that clears the session cookie
pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}
