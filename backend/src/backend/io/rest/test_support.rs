//! Router harness for handler tests: an in-memory SQLite backend and a
//! logged-in session token.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::backend::config::AppConfig;
use crate::backend::storage::DbConnection;
use crate::backend::{create_router, AppState};

pub struct TestApp {
    pub router: Router,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        let config = AppConfig::default();
        let state = AppState::new(connection, &config.password);
        let token = state.session_service.login(&config.password).await.unwrap();

        Self {
            router: create_router(state, &config.cors_origin).unwrap(),
            token,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send and decode a JSON response body
    pub async fn send_json(&self, request: Request<Body>) -> (axum::http::StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        (status, read_json(response).await)
    }
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}
