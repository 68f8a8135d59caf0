//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for both API versions, login and
//! the diagnostic endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use book_catalog::{api::create_router, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::in_memory(&Config::default()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"username": "admin", "password": "password123"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    json["token"].as_str().unwrap().to_string()
}

fn new_book() -> Value {
    json!({
        "title": "Clean Architecture",
        "author": "Robert C. Martin",
        "year": 2017,
        "price": 200000
    })
}

// == Login Tests ==

#[tokio::test]
async fn test_login_returns_token_and_expiration() {
    let app = create_test_app();

    for uri in ["/api/auth/login", "/api/v2/auth/login"] {
        let response = send(
            &app,
            json_request(
                "POST",
                uri,
                None,
                json!({"username": "user", "password": "userpass"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let json = body_to_json(response.into_body()).await;
        assert!(!json["token"].as_str().unwrap().is_empty());
        assert!(json["expiration"].is_string());
    }
}

#[tokio::test]
async fn test_login_bad_credentials_is_unauthorized() {
    let app = create_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"username": "admin", "password": "wrong"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].is_string());
}

// == Read Endpoint Tests ==

#[tokio::test]
async fn test_v1_list_omits_availability() {
    let app = create_test_app();

    let response = send(&app, get("/api/v1/books")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let books = json.as_array().unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(books[0]["id"], 1);
    assert_eq!(books[0]["title"], "1984");
    assert!(books[0].get("isAvailable").is_none());
}

#[tokio::test]
async fn test_v2_list_includes_availability() {
    let app = create_test_app();

    let response = send(&app, get("/api/v2/books")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let books = json.as_array().unwrap();
    assert_eq!(books.len(), 3);
    assert!(books.iter().all(|b| b["isAvailable"].is_boolean()));
}

#[tokio::test]
async fn test_get_book_by_id() {
    let app = create_test_app();

    let response = send(&app, get("/api/v2/books/2")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 2);
}

#[tokio::test]
async fn test_get_missing_book_is_not_found() {
    let app = create_test_app();

    for uri in ["/api/v1/books/999", "/api/v2/books/999"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let json = body_to_json(response.into_body()).await;
        assert!(json["error"].as_str().unwrap().contains("999"));
    }
}

// == Write Endpoint Tests ==

#[tokio::test]
async fn test_create_returns_created_with_location() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(
        &app,
        json_request("POST", "/api/v2/books", Some(&token), new_book()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/v2/books/4"
    );
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 4);
    assert_eq!(json["isAvailable"], true);

    let response = send(&app, get("/api/v1/books")).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_v1_create_location_and_shape() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(
        &app,
        json_request("POST", "/api/v1/books", Some(&token), new_book()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/v1/books/4"
    );
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("isAvailable").is_none());
}

#[tokio::test]
async fn test_create_invalid_returns_field_errors() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v2/books",
            Some(&token),
            json!({"title": "", "author": "Someone", "year": 1500, "price": -1}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    let errors = json["errors"].as_object().unwrap();
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("year"));
    assert!(errors.contains_key("price"));
    assert!(!errors.contains_key("author"));
}

fn raw_request(method: &str, uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_missing_year_is_bad_request() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v2/books",
            Some(&token),
            json!({"title": "T", "author": "A", "price": 10}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].is_string());
    assert!(json["errors"]["year"].is_array());
}

#[tokio::test]
async fn test_create_non_numeric_price_is_bad_request() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v1/books",
            Some(&token),
            json!({"title": "T", "author": "A", "year": 2000, "price": "abc"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["errors"]["body"].is_array());
}

#[tokio::test]
async fn test_update_malformed_body_is_bad_request() {
    let app = create_test_app();
    let token = login(&app).await;

    for body in [r#"{"title": "T""#, r#"{"title": 5, "year": 2000, "price": 1}"#, "[]"] {
        let response = send(&app, raw_request("PUT", "/api/v2/books/1", &token, body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    // Nothing was written
    let response = send(&app, get("/api/v2/books/1")).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["title"], "1984");
}

#[tokio::test]
async fn test_login_malformed_body_is_bad_request() {
    let app = create_test_app();

    let response = send(
        &app,
        json_request("POST", "/api/auth/login", None, json!({"username": "admin"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_create_price_beyond_storage_precision_is_bad_request() {
    let app = create_test_app();
    let token = login(&app).await;

    for price in [json!("12.345"), json!("10000000000000000")] {
        let mut body = new_book();
        body["price"] = price.clone();
        let response = send(
            &app,
            json_request("POST", "/api/v2/books", Some(&token), body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", price);
        let json = body_to_json(response.into_body()).await;
        assert!(json["errors"]["price"].is_array());
    }

    let response = send(&app, get("/api/v2/books")).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_writes_without_token_are_unauthorized() {
    let app = create_test_app();

    let requests = [
        json_request("POST", "/api/v1/books", None, new_book()),
        json_request("PUT", "/api/v2/books/1", None, new_book()),
        Request::builder()
            .method("DELETE")
            .uri("/api/v2/books/1")
            .body(Body::empty())
            .unwrap(),
    ];
    for request in requests {
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Nothing was written
    let response = send(&app, get("/api/v2/books")).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_write_with_bad_token_is_unauthorized() {
    let app = create_test_app();

    let response = send(&app, delete("/api/v2/books/1", "not.a.token")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_ignores_body_id() {
    let app = create_test_app();
    let token = login(&app).await;

    let mut body = new_book();
    body["id"] = json!(5);
    let response = send(
        &app,
        json_request("PUT", "/api/v1/books/1", Some(&token), body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get("/api/v2/books/1")).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "Clean Architecture");

    let response = send(&app, get("/api/v2/books/5")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_v1_update_keeps_availability() {
    let app = create_test_app();
    let token = login(&app).await;

    let mut body = new_book();
    body["isAvailable"] = json!(false);
    send(
        &app,
        json_request("PUT", "/api/v2/books/1", Some(&token), body),
    )
    .await;

    // V1 payloads cannot touch the flag
    let mut body = new_book();
    body["isAvailable"] = json!(true);
    send(
        &app,
        json_request("PUT", "/api/v1/books/1", Some(&token), body),
    )
    .await;

    let response = send(&app, get("/api/v2/books/1")).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["isAvailable"], false);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(
        &app,
        json_request("PUT", "/api/v2/books/999", Some(&token), new_book()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let app = create_test_app();
    let token = login(&app).await;

    let response = send(&app, delete("/api/v2/books/2", &token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, delete("/api/v2/books/2", &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, delete("/api/v1/books/999", &token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/api/v1/books")).await;
    let json = body_to_json(response.into_body()).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

// == Diagnostic Endpoint Tests ==

#[tokio::test]
async fn test_stats_track_cache_activity() {
    let app = create_test_app();
    let token = login(&app).await;

    send(&app, get("/api/v1/books")).await;
    send(&app, get("/api/v2/books")).await;
    send(&app, delete("/api/v2/books/3", &token)).await;

    let response = send(&app, get("/stats")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["invalidations"], 1);
    assert_eq!(json["cached"], false);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_service_instance_is_stable() {
    let app = create_test_app();

    let first = body_to_json(send(&app, get("/api/service-instance")).await.into_body()).await;
    let second = body_to_json(send(&app, get("/api/service-instance")).await.into_body()).await;

    let tag = first["instance"].as_u64().unwrap();
    assert!((1..100_000).contains(&tag));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();

    let response = send(&app, get("/nonexistent")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
