//! HTTP host for EventHub: owns the listener, the shared middleware stack
//! and the service-level endpoints (`/health`, `/openapi.json`, `/docs`).
//! Feature modules hand over their routers and OpenAPI documents.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::header, middleware::from_fn, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap the application routes with the service endpoints and middleware.
    pub fn build_router(
        &self,
        app: Router,
        openapi: Option<utoipa::openapi::OpenApi>,
    ) -> Result<Router> {
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(app);

        if self.config.enable_docs {
            if let Some(doc) = openapi {
                // Serialized once, served as static JSON
                let doc = Arc::new(
                    serde_json::to_value(doc).context("Failed to serialize OpenAPI document")?,
                );
                router = router
                    .route(
                        "/openapi.json",
                        get(move || {
                            let doc = doc.clone();
                            async move {
                                ([(header::CACHE_CONTROL, "no-store")], axum::Json((*doc).clone()))
                                    .into_response()
                            }
                        }),
                    )
                    .route("/docs", get(web::serve_docs));
            }
        }

        router = router.fallback(web::route_not_found);

        // Layers are listed innermost first; the last one added runs first:
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        // -> Timeout -> CORS -> BodyLimit -> handler
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));
        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            self.config.request_timeout_secs,
        )));

        let x_request_id = request_id::header();
        Ok(router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId)))
    }

    /// Bind `bind_addr` and serve until `cancel` fires.
    pub async fn serve(
        &self,
        router: Router,
        bind_addr: &str,
        cancel: CancellationToken,
    ) -> Result<()> {
        let addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{bind_addr}'"))?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);

        serve_listener(listener, router, cancel).await
    }
}

/// Serve on an already bound listener with graceful shutdown on cancel.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
