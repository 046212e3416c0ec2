use async_trait::async_trait;

use crate::contract::{
    error::EventsInfoError,
    model::{Attendee, Event, EventPatch, Identity, NewEvent, Registration, User},
};

/// Public API of the events_info module for in-process consumers.
#[async_trait]
pub trait EventsInfoApi: Send + Sync {
    async fn register(&self, registration: Registration) -> Result<User, EventsInfoError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String, EventsInfoError>;

    /// Resolve a bearer token into the caller's identity.
    async fn authenticate(&self, token: &str) -> Result<Identity, EventsInfoError>;

    async fn create_event(&self, caller: Identity, new_event: NewEvent)
        -> Result<Event, EventsInfoError>;

    async fn get_event(&self, id: i64) -> Result<Event, EventsInfoError>;

    async fn list_events(&self) -> Result<Vec<Event>, EventsInfoError>;

    async fn update_event(
        &self,
        caller: Identity,
        id: i64,
        patch: EventPatch,
    ) -> Result<Event, EventsInfoError>;

    async fn delete_event(&self, caller: Identity, id: i64) -> Result<(), EventsInfoError>;

    async fn add_attendee(
        &self,
        caller: Identity,
        event_id: i64,
        user_id: i64,
    ) -> Result<Attendee, EventsInfoError>;

    async fn remove_attendee(
        &self,
        caller: Identity,
        event_id: i64,
        user_id: i64,
    ) -> Result<(), EventsInfoError>;

    async fn list_attendees(&self, event_id: i64) -> Result<Vec<User>, EventsInfoError>;

    async fn list_events_for_attendee(&self, user_id: i64) -> Result<Vec<Event>, EventsInfoError>;
}
