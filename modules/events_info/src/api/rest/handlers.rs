use std::sync::Arc;

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::Json,
    Extension,
};
use modkit::{JsonBody, PathParam, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{
    AttendeeDto, CreateEventReq, EventDto, LoginReq, LoginResp, RegisterReq, UpdateEventReq,
    UserDto,
};
use crate::api::rest::error::map_domain_error;
use crate::auth::AuthService;
use crate::contract::model::Identity;
use crate::domain::service::Service;

type ApiResult<T> = Result<T, ProblemResponse>;

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Validation failed", body = modkit::Problem),
        (status = 409, description = "Email already registered", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn register(
    Extension(auth): Extension<Arc<AuthService>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<RegisterReq>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    info!("Registering account for {}", req.email);

    match auth.register(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to register: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Token issued", body = LoginResp),
        (status = 400, description = "Validation failed", body = modkit::Problem),
        (status = 401, description = "Wrong password", body = modkit::Problem),
        (status = 404, description = "Unknown email", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn login(
    Extension(auth): Extension<Arc<AuthService>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<LoginReq>,
) -> ApiResult<Json<LoginResp>> {
    match auth.login(&req.email, &req.password).await {
        Ok(token) => Ok(Json(LoginResp { token })),
        Err(e) => {
            error!("Login failed for {}: {}", req.email, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create an event owned by the caller
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventReq,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created event", body = EventDto),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 401, description = "Unauthorized", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn create_event(
    Extension(svc): Extension<Arc<Service>>,
    Extension(caller): Extension<Identity>,
    OriginalUri(uri): OriginalUri,
    JsonBody(req): JsonBody<CreateEventReq>,
) -> ApiResult<(StatusCode, Json<EventDto>)> {
    match svc.create_event(caller, req.into()).await {
        Ok(event) => Ok((StatusCode::CREATED, Json(EventDto::from(event)))),
        Err(e) => {
            error!("Failed to create event: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event found", body = EventDto),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 404, description = "Not Found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn get_event(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    PathParam(id): PathParam<i64>,
) -> ApiResult<Json<EventDto>> {
    match svc.get_event(id).await {
        Ok(event) => Ok(Json(EventDto::from(event))),
        Err(e) => {
            error!("Failed to get event {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List all events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "All events", body = [EventDto]),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn list_events(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<EventDto>>> {
    match svc.list_events().await {
        Ok(events) => Ok(Json(events.into_iter().map(EventDto::from).collect())),
        Err(e) => {
            error!("Failed to list events: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an event owned by the caller (partial)
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    request_body = UpdateEventReq,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated event", body = EventDto),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 401, description = "Unauthorized", body = modkit::Problem),
        (status = 403, description = "Caller is not the owner", body = modkit::Problem),
        (status = 404, description = "Not Found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn update_event(
    Extension(svc): Extension<Arc<Service>>,
    Extension(caller): Extension<Identity>,
    OriginalUri(uri): OriginalUri,
    PathParam(id): PathParam<i64>,
    body: Result<JsonBody<UpdateEventReq>, ProblemResponse>,
) -> ApiResult<Json<EventDto>> {
    // A missing event or a foreign owner outranks a bad payload
    if let Err(e) = svc.check_owner(caller, id).await {
        error!("Refusing update of event {}: {}", id, e);
        return Err(map_domain_error(&e, uri.path()));
    }
    let JsonBody(req) = body?;

    match svc.update_event(caller, id, req.into()).await {
        Ok(event) => Ok(Json(EventDto::from(event))),
        Err(e) => {
            error!("Failed to update event {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete an event owned by the caller
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i64, Path, description = "Event id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 401, description = "Unauthorized", body = modkit::Problem),
        (status = 403, description = "Caller is not the owner", body = modkit::Problem),
        (status = 404, description = "Not Found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn delete_event(
    Extension(svc): Extension<Arc<Service>>,
    Extension(caller): Extension<Identity>,
    OriginalUri(uri): OriginalUri,
    PathParam(id): PathParam<i64>,
) -> ApiResult<StatusCode> {
    match svc.delete_event(caller, id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete event {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Add a user to the attendee list of an event owned by the caller
#[utoipa::path(
    post,
    path = "/events/{id}/attendees/{user_id}",
    tag = "attendees",
    params(
        ("id" = i64, Path, description = "Event id"),
        ("user_id" = i64, Path, description = "User id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Attendee added", body = AttendeeDto),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 401, description = "Unauthorized", body = modkit::Problem),
        (status = 403, description = "Caller is not the owner", body = modkit::Problem),
        (status = 404, description = "Event or user not found", body = modkit::Problem),
        (status = 409, description = "Already attending", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn add_attendee(
    Extension(svc): Extension<Arc<Service>>,
    Extension(caller): Extension<Identity>,
    OriginalUri(uri): OriginalUri,
    PathParam((event_id, user_id)): PathParam<(i64, i64)>,
) -> ApiResult<(StatusCode, Json<AttendeeDto>)> {
    match svc.add_attendee(caller, event_id, user_id).await {
        Ok(attendee) => Ok((StatusCode::CREATED, Json(AttendeeDto::from(attendee)))),
        Err(e) => {
            error!("Failed to add user {} to event {}: {}", user_id, event_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List the users attending an event
#[utoipa::path(
    get,
    path = "/events/{id}/attendees",
    tag = "attendees",
    params(("id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Attending users", body = [UserDto]),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn list_attendees(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    PathParam(event_id): PathParam<i64>,
) -> ApiResult<Json<Vec<UserDto>>> {
    match svc.list_attendees(event_id).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => {
            error!("Failed to list attendees of event {}: {}", event_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Remove a user from the attendee list of an event owned by the caller
#[utoipa::path(
    delete,
    path = "/events/{id}/attendees/{user_id}",
    tag = "attendees",
    params(
        ("id" = i64, Path, description = "Event id"),
        ("user_id" = i64, Path, description = "User id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Attendee removed (or was not attending)"),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 401, description = "Unauthorized", body = modkit::Problem),
        (status = 403, description = "Caller is not the owner", body = modkit::Problem),
        (status = 404, description = "Event not found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn remove_attendee(
    Extension(svc): Extension<Arc<Service>>,
    Extension(caller): Extension<Identity>,
    OriginalUri(uri): OriginalUri,
    PathParam((event_id, user_id)): PathParam<(i64, i64)>,
) -> ApiResult<StatusCode> {
    match svc.remove_attendee(caller, event_id, user_id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to remove user {} from event {}: {}", user_id, event_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List the events a user attends
#[utoipa::path(
    get,
    path = "/attendees/{id}/events",
    tag = "attendees",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Attended events", body = [EventDto]),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem)
    )
)]
pub async fn list_events_for_attendee(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    PathParam(user_id): PathParam<i64>,
) -> ApiResult<Json<Vec<EventDto>>> {
    match svc.list_events_for_attendee(user_id).await {
        Ok(events) => Ok(Json(events.into_iter().map(EventDto::from).collect())),
        Err(e) => {
            error!("Failed to list events of attendee {}: {}", user_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
