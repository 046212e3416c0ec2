use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{Attendee, Event, EventPatch, NewEvent, Registration, User};

/// REST DTO for registering an account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterReq {
    #[schema(min_length = 3, example = "alice123")]
    pub name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(min_length = 8)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResp {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// REST DTO for creating an event. Any owner field in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEventReq {
    #[schema(min_length = 3)]
    pub name: String,
    #[schema(min_length = 10)]
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[schema(example = "2025-06-01")]
    pub date: NaiveDate,
    #[schema(min_length = 3)]
    pub location: String,
}

/// REST DTO for updating an event (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateEventReq {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDto {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendeeDto {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<RegisterReq> for Registration {
    fn from(req: RegisterReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            owner_id: e.owner_id,
            name: e.name,
            description: e.description,
            date: e.date,
            location: e.location,
        }
    }
}

impl From<CreateEventReq> for NewEvent {
    fn from(req: CreateEventReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            date: req.date,
            location: req.location,
        }
    }
}

impl From<UpdateEventReq> for EventPatch {
    fn from(req: UpdateEventReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            date: req.date,
            location: req.location,
        }
    }
}

impl From<Attendee> for AttendeeDto {
    fn from(a: Attendee) -> Self {
        Self {
            id: a.id,
            event_id: a.event_id,
            user_id: a.user_id,
        }
    }
}
