//! End-to-end flow over the HTTP router with the CSV backend.

use attendance_backend::backend::storage::CsvConnection;
use attendance_backend::{create_router, initialize_backend};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

struct Client {
    router: Router,
    token: Option<String>,
}

impl Client {
    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.call(method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn attendance_day_from_login_to_export() {
    let data_dir = TempDir::new().unwrap();
    let connection = CsvConnection::new(data_dir.path()).unwrap();
    let router = create_router(initialize_backend(connection, "17120"), "http://localhost:8080").unwrap();

    let mut client = Client { router, token: None };

    let (status, _) = client.json(Method::GET, "/api/programs", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, login) = client
        .json(Method::POST, "/api/session/login", Some(json!({"password": "17120"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    client.token = login["token"].as_str().map(str::to_string);

    let (status, program) = client
        .json(Method::POST, "/api/programs", Some(json!({"name": "아르딤 주간반"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let program_id = program["id"].as_str().unwrap().to_string();

    let mut participant_ids = Vec::new();
    for name in ["김철수", "이영희"] {
        let (status, participant) = client
            .json(
                Method::POST,
                "/api/participants",
                Some(json!({"name": name, "programId": program_id})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        participant_ids.push(participant["id"].as_str().unwrap().to_string());
    }

    let marks = [
        (&participant_ids[0], "2024-06-03", "present"),
        (&participant_ids[0], "2024-06-04", "present"),
        (&participant_ids[1], "2024-06-03", "present"),
        (&participant_ids[1], "2024-06-04", "absent"),
    ];
    for (participant_id, date, status) in marks {
        let (code, body) = client
            .json(
                Method::POST,
                "/api/attendance/mark",
                Some(json!({
                    "participantId": participant_id,
                    "programId": program_id,
                    "date": date,
                    "status": status,
                })),
            )
            .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["action"], "saved");
    }

    let (_, dashboard) = client
        .json(Method::GET, &format!("/api/programs/{}/stats?date=2024-06-05", program_id), None)
        .await;
    assert_eq!(dashboard["weekly"]["actualCount"], 2);
    assert_eq!(dashboard["weekly"]["totalCount"], 3);
    assert_eq!(dashboard["monthly"]["totalCount"], 3);

    let (status, _) = client
        .json(
            Method::PUT,
            &format!("/api/programs/{}/journals/2024-06-03", program_id),
            Some(json!({"content": "오전 체조, 점심 후 산책"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, bytes) = client
        .call(Method::POST, "/api/export", Some(json!({"programId": program_id})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));

    let (status, _) = client
        .json(Method::DELETE, &format!("/api/programs/{}", program_id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, records) = client
        .json(Method::GET, &format!("/api/programs/{}/attendance", program_id), None)
        .await;
    assert_eq!(records["records"].as_array().unwrap().len(), 0);

    let (status, _) = client.json(Method::POST, "/api/session/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = client.json(Method::GET, "/api/programs", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
