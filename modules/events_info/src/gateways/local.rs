use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::gate::AuthService;
use crate::contract::{
    client::EventsInfoApi,
    error::EventsInfoError,
    model::{Attendee, Event, EventPatch, Identity, NewEvent, Registration, User},
};
use crate::domain::service::Service;

/// Local implementation of the EventsInfoApi trait that delegates to the
/// domain service and the authentication gate.
pub struct EventsInfoLocalClient {
    service: Arc<Service>,
    auth: Arc<AuthService>,
}

impl EventsInfoLocalClient {
    pub fn new(service: Arc<Service>, auth: Arc<AuthService>) -> Self {
        Self { service, auth }
    }
}

#[async_trait]
impl EventsInfoApi for EventsInfoLocalClient {
    async fn register(&self, registration: Registration) -> Result<User, EventsInfoError> {
        self.auth.register(registration).await.map_err(Into::into)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, EventsInfoError> {
        self.auth.login(email, password).await.map_err(Into::into)
    }

    async fn authenticate(&self, token: &str) -> Result<Identity, EventsInfoError> {
        self.auth.authenticate(token).map_err(Into::into)
    }

    async fn create_event(
        &self,
        caller: Identity,
        new_event: NewEvent,
    ) -> Result<Event, EventsInfoError> {
        self.service
            .create_event(caller, new_event)
            .await
            .map_err(Into::into)
    }

    async fn get_event(&self, id: i64) -> Result<Event, EventsInfoError> {
        self.service.get_event(id).await.map_err(Into::into)
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventsInfoError> {
        self.service.list_events().await.map_err(Into::into)
    }

    async fn update_event(
        &self,
        caller: Identity,
        id: i64,
        patch: EventPatch,
    ) -> Result<Event, EventsInfoError> {
        self.service
            .update_event(caller, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_event(&self, caller: Identity, id: i64) -> Result<(), EventsInfoError> {
        self.service.delete_event(caller, id).await.map_err(Into::into)
    }

    async fn add_attendee(
        &self,
        caller: Identity,
        event_id: i64,
        user_id: i64,
    ) -> Result<Attendee, EventsInfoError> {
        self.service
            .add_attendee(caller, event_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn remove_attendee(
        &self,
        caller: Identity,
        event_id: i64,
        user_id: i64,
    ) -> Result<(), EventsInfoError> {
        self.service
            .remove_attendee(caller, event_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn list_attendees(&self, event_id: i64) -> Result<Vec<User>, EventsInfoError> {
        self.service
            .list_attendees(event_id)
            .await
            .map_err(Into::into)
    }

    async fn list_events_for_attendee(&self, user_id: i64) -> Result<Vec<Event>, EventsInfoError> {
        self.service
            .list_events_for_attendee(user_id)
            .await
            .map_err(Into::into)
    }
}
