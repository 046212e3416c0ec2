use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::rest::{dto, handlers};

/// Registers the `bearer_auth` scheme referenced by the protected routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "EventHub API", description = "Events, attendees and account management"),
    servers((url = "/api/v1")),
    paths(
        handlers::register,
        handlers::login,
        handlers::create_event,
        handlers::get_event,
        handlers::list_events,
        handlers::update_event,
        handlers::delete_event,
        handlers::add_attendee,
        handlers::list_attendees,
        handlers::remove_attendee,
        handlers::list_events_for_attendee,
    ),
    components(schemas(
        dto::RegisterReq,
        dto::LoginReq,
        dto::LoginResp,
        dto::UserDto,
        dto::CreateEventReq,
        dto::UpdateEventReq,
        dto::EventDto,
        dto::AttendeeDto,
        modkit::Problem,
        modkit::ValidationError,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "events", description = "Event management"),
        (name = "attendees", description = "Event attendance"),
    )
)]
pub struct ApiDoc;
