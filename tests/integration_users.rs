mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    ADMIN_EMAIL, ADMIN_ID, INACTIVE_ID, STAFF_EMAIL, STAFF_ID, TEACHER_EMAIL, TEACHER_ID,
    test_state, test_users, token_for,
};
use catequesis::catequesis_config::{CorsConfig, ServerConfig};
use catequesis::router::init_router;
use catequesis::state::init_app_state;
use http_body_util::BodyExt;
use std::io::Write;
use tower::ServiceExt;

fn users_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_admin_lists_users() {
    let state = test_state();
    let token = token_for(&state, ADMIN_ID, ADMIN_EMAIL, "admin");
    let app = init_router(state);

    let response = app
        .oneshot(users_request("/api/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), test_users().len());
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_admin_filters_users_by_role() {
    let state = test_state();
    let token = token_for(&state, ADMIN_ID, ADMIN_EMAIL, "admin");
    let app = init_router(state);

    let response = app
        .oneshot(users_request("/api/users?role=teacher", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body.as_array().unwrap();
    assert!(!users.is_empty());
    assert!(users.iter().all(|u| u["role"] == "teacher"));
}

#[tokio::test]
async fn test_teacher_cannot_list_users() {
    let state = test_state();
    let token = token_for(&state, TEACHER_ID, TEACHER_EMAIL, "teacher");
    let app = init_router(state);

    let response = app
        .oneshot(users_request("/api/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn test_staff_cannot_list_users() {
    let state = test_state();
    let token = token_for(&state, STAFF_ID, STAFF_EMAIL, "staff");
    let app = init_router(state);

    let response = app
        .oneshot(users_request("/api/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_role_tag_is_forbidden() {
    let state = test_state();
    let token = token_for(&state, ADMIN_ID, ADMIN_EMAIL, "root");
    let app = init_router(state);

    let response = app
        .oneshot(users_request("/api/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_without_token() {
    let app = init_router(test_state());

    let response = app
        .oneshot(users_request("/api/users", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_staff_looks_up_user() {
    let state = test_state();
    let token = token_for(&state, STAFF_ID, STAFF_EMAIL, "staff");
    let app = init_router(state);

    let response = app
        .oneshot(users_request(&format!("/api/users/{}", TEACHER_ID), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["subject_id"], TEACHER_ID);
    assert_eq!(body["email"], TEACHER_EMAIL);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_admin_looks_up_inactive_user() {
    let state = test_state();
    let token = token_for(&state, ADMIN_ID, ADMIN_EMAIL, "admin");
    let app = init_router(state);

    let response = app
        .oneshot(users_request(&format!("/api/users/{}", INACTIVE_ID), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
async fn test_legacy_staff_tag_looks_up_user() {
    let state = test_state();
    let token = token_for(&state, STAFF_ID, STAFF_EMAIL, "secretaria");
    let app = init_router(state);

    let response = app
        .oneshot(users_request(&format!("/api/users/{}", ADMIN_ID), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_teacher_cannot_look_up_users() {
    let state = test_state();
    let token = token_for(&state, TEACHER_ID, TEACHER_EMAIL, "teacher");
    let app = init_router(state);

    // Not even their own record: the lookup is an office route.
    let response = app
        .oneshot(users_request(&format!("/api/users/{}", TEACHER_ID), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Forbidden");
}

#[tokio::test]
async fn test_look_up_missing_user() {
    let state = test_state();
    let token = token_for(&state, STAFF_ID, STAFF_EMAIL, "staff");
    let app = init_router(state);

    let response = app
        .oneshot(users_request("/api/users/999", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_look_up_user_without_token() {
    let app = init_router(test_state());

    let response = app
        .oneshot(users_request(&format!("/api/users/{}", ADMIN_ID), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing or malformed authorization header");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = init_router(test_state());

    let response = app.oneshot(users_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert!(request_id.is_some_and(|id| id.len() == 36));

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_rejected_requests_carry_distinct_request_ids() {
    let state = test_state();

    let first = init_router(state.clone())
        .oneshot(users_request("/api/users", None))
        .await
        .unwrap();
    let second = init_router(state)
        .oneshot(users_request("/api/users", None))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);
    let first_id = first.headers().get("x-request-id").unwrap();
    let second_id = second.headers().get("x-request-id").unwrap();
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_app_state_from_directory_file() {
    let users = serde_json::json!([
        {
            "subject_id": 10,
            "email": "catequista@parroquia.local",
            "full_name": "Rosa Martín",
            "role": "maestro",
            "password_hash": "$2b$12$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZ01234"
        }
    ]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", users).unwrap();

    let path = file.path().to_string_lossy().to_string();
    let server_config = ServerConfig::from_source(|key| match key {
        "USER_DIRECTORY_PATH" => Some(path.clone()),
        _ => None,
    })
    .unwrap();

    let state = init_app_state(
        common::test_jwt_config(),
        CorsConfig::from_source(|_| None),
        &server_config,
    )
    .unwrap();
    let token = token_for(&state, 10, "catequista@parroquia.local", "teacher");
    let app = init_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["is_active"], true);
}
