use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::rest::{auth::require_auth, handlers};
use crate::auth::AuthService;
use crate::domain::service::Service;

/// Build the module router. Paths are relative; the host nests them under
/// its API prefix.
pub fn register_routes(service: Arc<Service>, auth: Arc<AuthService>) -> Router {
    let public = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/events", get(handlers::list_events))
        .route("/events/{id}", get(handlers::get_event))
        .route("/events/{id}/attendees", get(handlers::list_attendees))
        .route(
            "/attendees/{id}/events",
            get(handlers::list_events_for_attendee),
        );

    let protected = Router::new()
        .route("/events", post(handlers::create_event))
        .route(
            "/events/{id}",
            put(handlers::update_event).delete(handlers::delete_event),
        )
        .route(
            "/events/{id}/attendees/{user_id}",
            post(handlers::add_attendee).delete(handlers::remove_attendee),
        )
        // Unmatched paths fall through to the 404 fallback, not 401
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_auth));

    public
        .merge(protected)
        .layer(Extension(service))
        .layer(Extension(auth))
}
