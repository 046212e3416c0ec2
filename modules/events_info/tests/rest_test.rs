mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::setup_module;

async fn app() -> Router {
    let module = setup_module().await;
    Router::new().nest("/api/v1", module.router())
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register_and_login(app: &Router, name: &str, email: &str) -> (i64, String) {
    let (status, user) = call(
        app,
        Method::POST,
        "/api/v1/register",
        None,
        Some(json!({"name": name, "email": email, "password": "password1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, login) = call(
        app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({"email": email, "password": "password1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        user["id"].as_i64().unwrap(),
        login["token"].as_str().unwrap().to_string(),
    )
}

fn event_body() -> Value {
    json!({
        "name": "RustConf",
        "description": "A gathering of fellow enthusiasts",
        "date": "2025-06-01",
        "location": "Berlin"
    })
}

#[tokio::test]
async fn full_event_scenario() {
    let app = app().await;

    let (status, alice) = call(
        &app,
        Method::POST,
        "/api/v1/register",
        None,
        Some(json!({"name": "alice123", "email": "a@x.com", "password": "password1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(alice["name"], "alice123");
    assert!(alice.get("password").is_none());
    let alice_id = alice["id"].as_i64().unwrap();

    let (status, problem) = call(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({"email": "a@x.com", "password": "wrongpass"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(problem["code"], "AUTH_INVALID_CREDENTIALS");

    let (status, login) = call(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({"email": "a@x.com", "password": "password1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let alice_token = login["token"].as_str().unwrap().to_string();

    let (status, event) = call(
        &app,
        Method::POST,
        "/api/v1/events",
        Some(&alice_token),
        Some(event_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["owner_id"], alice_id);
    assert_eq!(event["date"], "2025-06-01");
    let event_id = event["id"].as_i64().unwrap();

    let (bob_id, bob_token) = register_and_login(&app, "bobby", "b@x.com").await;

    let (status, problem) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/events/{event_id}"),
        Some(&bob_token),
        Some(json!({"name": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(problem["code"], "EVENTS_FORBIDDEN");
    assert_eq!(problem["instance"], format!("/api/v1/events/{event_id}"));

    let attendee_uri = format!("/api/v1/events/{event_id}/attendees/{bob_id}");
    let (status, attendee) = call(&app, Method::POST, &attendee_uri, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(attendee["user_id"], bob_id);

    let (status, problem) = call(&app, Method::POST, &attendee_uri, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(problem["code"], "ATTENDEES_CONFLICT");

    let (status, attendees) = call(
        &app,
        Method::GET,
        &format!("/api/v1/events/{event_id}/attendees"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let attendees = attendees.as_array().unwrap();
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0]["id"], bob_id);
    assert_eq!(attendees[0]["email"], "b@x.com");

    let (status, events) = call(
        &app,
        Method::GET,
        &format!("/api/v1/attendees/{bob_id}/events"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events[0]["id"], event_id);
}

#[tokio::test]
async fn owner_field_in_payload_is_ignored() {
    let app = app().await;
    let (alice_id, token) = register_and_login(&app, "alice123", "a@x.com").await;

    let mut body = event_body();
    body["owner_id"] = json!(alice_id + 100);
    let (status, event) = call(&app, Method::POST, "/api/v1/events", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["owner_id"], alice_id);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = app().await;

    let (status, problem) =
        call(&app, Method::POST, "/api/v1/events", None, Some(event_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(problem["code"], "AUTH_MISSING_TOKEN");

    let (status, problem) = call(
        &app,
        Method::DELETE,
        "/api/v1/events/1",
        Some("not.a.jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(problem["code"], "AUTH_MALFORMED_TOKEN");
}

#[tokio::test]
async fn reads_are_public() {
    let app = app().await;
    let (status, events) = call(&app, Method::GET, "/api/v1/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events, json!([]));
}

#[tokio::test]
async fn bad_inputs_are_400() {
    let app = app().await;
    let (_, token) = register_and_login(&app, "alice123", "a@x.com").await;

    let (status, problem) = call(&app, Method::GET, "/api/v1/events/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "INVALID_PATH");

    let mut body = event_body();
    body["date"] = json!("June first");
    let (status, problem) =
        call(&app, Method::POST, "/api/v1/events", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "INVALID_BODY");

    let mut body = event_body();
    body["description"] = json!("short");
    let (status, problem) =
        call(&app, Method::POST, "/api/v1/events", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "EVENTS_VALIDATION");
    assert_eq!(problem["errors"][0]["pointer"], "/description");
}

#[tokio::test]
async fn update_checks_event_and_owner_before_body() {
    let app = app().await;
    let (_, alice) = register_and_login(&app, "alice123", "a@x.com").await;
    let (_, bob) = register_and_login(&app, "bobby", "b@x.com").await;
    let (_, event) =
        call(&app, Method::POST, "/api/v1/events", Some(&alice), Some(event_body())).await;
    let uri = format!("/api/v1/events/{}", event["id"]);
    let bad = json!({"date": "not-a-date"});

    let (status, problem) = call(&app, Method::PUT, &uri, Some(&bob), Some(bad.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(problem["code"], "EVENTS_FORBIDDEN");

    let (status, problem) =
        call(&app, Method::PUT, "/api/v1/events/999", Some(&alice), Some(bad.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "EVENTS_NOT_FOUND");

    let (status, problem) = call(&app, Method::PUT, &uri, Some(&alice), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["code"], "INVALID_BODY");
    assert_eq!(problem["instance"], uri);

    let (status, updated) = call(
        &app,
        Method::PUT,
        &uri,
        Some(&alice),
        Some(json!({"location": "Lisbon"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["location"], "Lisbon");
    assert_eq!(updated["name"], "RustConf");
}

#[tokio::test]
async fn register_conflict_and_unknown_login() {
    let app = app().await;
    register_and_login(&app, "alice123", "a@x.com").await;

    let (status, problem) = call(
        &app,
        Method::POST,
        "/api/v1/register",
        None,
        Some(json!({"name": "alice456", "email": "a@x.com", "password": "password1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(problem["code"], "USERS_EMAIL_CONFLICT");

    let (status, problem) = call(
        &app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(json!({"email": "nobody@x.com", "password": "password1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "USERS_NOT_FOUND");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app().await;
    let (_, token) = register_and_login(&app, "alice123", "a@x.com").await;
    let (_, event) =
        call(&app, Method::POST, "/api/v1/events", Some(&token), Some(event_body())).await;
    let uri = format!("/api/v1/events/{}", event["id"]);

    let (status, body) = call(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, problem) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "EVENTS_NOT_FOUND");
}
