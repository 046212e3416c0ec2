use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::contract::model::{Attendee, Event, EventPatch, Identity, NewEvent, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{AttendeesRepository, EventsRepository, StoreError, UsersRepository};
use crate::domain::validation::{
    min_chars, MIN_EVENT_DESCRIPTION, MIN_EVENT_LOCATION, MIN_EVENT_NAME,
};

/// Event and attendance manager.
///
/// Every mutation re-reads the event, checks that the caller owns it and
/// hands the observed owner down to the store as a write precondition.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    users: Arc<dyn UsersRepository>,
    events: Arc<dyn EventsRepository>,
    attendees: Arc<dyn AttendeesRepository>,
}

impl Service {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        events: Arc<dyn EventsRepository>,
        attendees: Arc<dyn AttendeesRepository>,
    ) -> Self {
        Self {
            users,
            events,
            attendees,
        }
    }

    #[instrument(
        name = "events_info.service.create_event",
        skip(self, caller, new_event),
        fields(caller = caller.user_id, name = %new_event.name)
    )]
    pub async fn create_event(
        &self,
        caller: Identity,
        new_event: NewEvent,
    ) -> Result<Event, DomainError> {
        info!("Creating new event");

        validate_new_event(&new_event)?;

        let event = self.events.insert(caller.user_id, new_event).await?;

        info!("Successfully created event with id={}", event.id);
        Ok(event)
    }

    #[instrument(name = "events_info.service.get_event", skip(self), fields(event_id = id))]
    pub async fn get_event(&self, id: i64) -> Result<Event, DomainError> {
        debug!("Getting event by id");
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::event_not_found(id))
    }

    #[instrument(name = "events_info.service.list_events", skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>, DomainError> {
        let events = self.events.list_all().await?;
        debug!("Listed {} events", events.len());
        Ok(events)
    }

    #[instrument(
        name = "events_info.service.update_event",
        skip(self, caller, patch),
        fields(caller = caller.user_id, event_id = id)
    )]
    pub async fn update_event(
        &self,
        caller: Identity,
        id: i64,
        patch: EventPatch,
    ) -> Result<Event, DomainError> {
        info!("Updating event");

        let mut current = self.owned_event(caller, id).await?;

        validate_event_patch(&patch)?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(description) = patch.description {
            current.description = description;
        }
        if let Some(date) = patch.date {
            current.date = date;
        }
        if let Some(location) = patch.location {
            current.location = location;
        }

        if !self.events.update(&current, caller.user_id).await? {
            // Deleted (or re-owned) between the read and the write
            warn!("Event vanished before update could be applied");
            return Err(DomainError::event_not_found(id));
        }

        info!("Successfully updated event");
        Ok(current)
    }

    #[instrument(
        name = "events_info.service.delete_event",
        skip(self, caller),
        fields(caller = caller.user_id, event_id = id)
    )]
    pub async fn delete_event(&self, caller: Identity, id: i64) -> Result<(), DomainError> {
        info!("Deleting event");

        self.owned_event(caller, id).await?;

        if !self.events.delete(id, caller.user_id).await? {
            warn!("Event vanished before delete could be applied");
            return Err(DomainError::event_not_found(id));
        }

        info!("Successfully deleted event");
        Ok(())
    }

    #[instrument(
        name = "events_info.service.add_attendee",
        skip(self, caller),
        fields(caller = caller.user_id)
    )]
    pub async fn add_attendee(
        &self,
        caller: Identity,
        event_id: i64,
        user_id: i64,
    ) -> Result<Attendee, DomainError> {
        info!("Adding attendee");

        self.owned_event(caller, event_id).await?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::user_not_found(user_id));
        }

        if self.attendees.find(event_id, user_id).await?.is_some() {
            return Err(DomainError::attendee_already_exists(event_id, user_id));
        }

        let attendee = match self.attendees.insert(event_id, user_id).await {
            Ok(a) => a,
            // Lost a race against a concurrent add of the same pair
            Err(StoreError::Conflict) => {
                return Err(DomainError::attendee_already_exists(event_id, user_id))
            }
            Err(e) => return Err(e.into()),
        };

        info!("Successfully added attendee with id={}", attendee.id);
        Ok(attendee)
    }

    #[instrument(
        name = "events_info.service.remove_attendee",
        skip(self, caller),
        fields(caller = caller.user_id)
    )]
    pub async fn remove_attendee(
        &self,
        caller: Identity,
        event_id: i64,
        user_id: i64,
    ) -> Result<(), DomainError> {
        info!("Removing attendee");

        self.owned_event(caller, event_id).await?;

        let removed = self.attendees.delete(event_id, user_id).await?;
        debug!(removed, "Attendee removal applied");
        Ok(())
    }

    #[instrument(name = "events_info.service.list_attendees", skip(self))]
    pub async fn list_attendees(&self, event_id: i64) -> Result<Vec<User>, DomainError> {
        let ids: Vec<i64> = self
            .attendees
            .list_for_event(event_id)
            .await?
            .into_iter()
            .map(|a| a.user_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.users.find_many(&ids).await?)
    }

    #[instrument(
        name = "events_info.service.list_events_for_attendee",
        skip(self)
    )]
    pub async fn list_events_for_attendee(&self, user_id: i64) -> Result<Vec<Event>, DomainError> {
        let ids: Vec<i64> = self
            .attendees
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(|a| a.event_id)
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.events.find_many(&ids).await?)
    }

    /// Fails with `EventNotFound` or `Forbidden` unless `caller` owns event `id`.
    #[instrument(
        name = "events_info.service.check_owner",
        skip(self, caller),
        fields(caller = caller.user_id, event_id = id)
    )]
    pub async fn check_owner(&self, caller: Identity, id: i64) -> Result<(), DomainError> {
        self.owned_event(caller, id).await.map(|_| ())
    }

    /// Load the event and make sure `caller` owns it.
    async fn owned_event(&self, caller: Identity, id: i64) -> Result<Event, DomainError> {
        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::event_not_found(id))?;

        if event.owner_id != caller.user_id {
            warn!(owner = event.owner_id, "Caller is not the event owner");
            return Err(DomainError::forbidden(id, caller.user_id));
        }
        Ok(event)
    }
}

// --- validation helpers ---

fn validate_new_event(e: &NewEvent) -> Result<(), DomainError> {
    min_chars("name", &e.name, MIN_EVENT_NAME)?;
    min_chars("description", &e.description, MIN_EVENT_DESCRIPTION)?;
    min_chars("location", &e.location, MIN_EVENT_LOCATION)?;
    Ok(())
}

fn validate_event_patch(p: &EventPatch) -> Result<(), DomainError> {
    if let Some(ref name) = p.name {
        min_chars("name", name, MIN_EVENT_NAME)?;
    }
    if let Some(ref description) = p.description {
        min_chars("description", description, MIN_EVENT_DESCRIPTION)?;
    }
    if let Some(ref location) = p.location {
        min_chars("location", location, MIN_EVENT_LOCATION)?;
    }
    Ok(())
}
