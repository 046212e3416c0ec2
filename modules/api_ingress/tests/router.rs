use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use tower::util::ServiceExt;
use utoipa::OpenApi;

use api_ingress::{ApiIngress, ApiIngressConfig};

#[derive(OpenApi)]
#[openapi(info(title = "demo", version = "0.0.1"))]
struct DemoDoc;

fn app_routes() -> Router {
    Router::new()
        .route("/api/v1/ping", get(|| async { "pong" }))
        .route("/api/v1/upload", post(|body: String| async move { body.len().to_string() }))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let router = ApiIngress::new(ApiIngressConfig::default()).build_router(app_routes(), None)
        .unwrap();
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn application_routes_are_mounted() {
    let router = ApiIngress::new(ApiIngressConfig::default()).build_router(app_routes(), None)
        .unwrap();
    let response = router
        .oneshot(Request::get("/api/v1/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_and_docs_served_when_enabled() {
    let ingress = ApiIngress::new(ApiIngressConfig::default());
    let router = ingress.build_router(app_routes(), Some(DemoDoc::openapi()))
        .unwrap();

    let response = router
        .clone()
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let json = body_json(response).await;
    assert_eq!(json["info"]["title"], "demo");

    let response = router
        .oneshot(Request::get("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn docs_hidden_when_disabled() {
    let cfg = ApiIngressConfig {
        enable_docs: false,
        ..Default::default()
    };
    let router = ApiIngress::new(cfg).build_router(app_routes(), Some(DemoDoc::openapi()))
        .unwrap();

    let response = router
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_problem_json() {
    let router = ApiIngress::new(ApiIngressConfig::default()).build_router(app_routes(), None)
        .unwrap();
    let response = router
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], "ROUTE_NOT_FOUND");
    assert_eq!(json["instance"], "/nope");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let cfg = ApiIngressConfig {
        body_limit_bytes: 8,
        ..Default::default()
    };
    let router = ApiIngress::new(cfg).build_router(app_routes(), None)
        .unwrap();

    let payload = "x".repeat(64);
    let response = router
        .oneshot(
            Request::post("/api/v1/upload")
                .header(header::CONTENT_LENGTH, payload.len())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
