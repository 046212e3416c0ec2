//! Request extractors whose rejections are rendered as Problem Details
//! instead of axum's plain-text defaults.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::problem::{bad_request, ProblemResponse};

/// JSON request body. Malformed or mistyped payloads yield `400 Bad Request`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let instance = req.uri().path().to_owned();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%instance, error = %rejection.body_text(), "rejected JSON body");
                Err(bad_request(rejection.body_text())
                    .with_code("INVALID_BODY")
                    .with_instance(instance))
            }
        }
    }
}

/// Typed path parameters. A segment that fails to parse yields `400 Bad Request`.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_request(rejection.body_text())
                .with_code("INVALID_PATH")
                .with_instance(parts.uri.path())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/echo",
                post(|JsonBody(p): JsonBody<Payload>| async move { p.name }),
            )
            .route(
                "/items/{id}",
                get(|PathParam(id): PathParam<i64>| async move { id.to_string() }),
            )
    }

    async fn problem_of(resp: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn valid_body_and_path_pass_through() {
        let resp = app()
            .oneshot(
                Request::post("/echo")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"party"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app()
            .oneshot(Request::get("/items/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_is_a_problem() {
        let resp = app()
            .oneshot(
                Request::post("/echo")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem = problem_of(resp).await;
        assert_eq!(problem["code"], "INVALID_BODY");
        assert_eq!(problem["instance"], "/echo");
    }

    #[tokio::test]
    async fn non_numeric_path_is_a_problem() {
        let resp = app()
            .oneshot(Request::get("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let problem = problem_of(resp).await;
        assert_eq!(problem["code"], "INVALID_PATH");
        assert_eq!(problem["status"], 400);
    }
}
