use crate::contract::model::{Attendee, Event, User};
use crate::domain::repo::UserCredentials;
use crate::infra::storage::entity::{attendee, event, user};

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

impl From<user::Model> for UserCredentials {
    fn from(m: user::Model) -> Self {
        let password_hash = m.password_hash.clone();
        Self {
            user: m.into(),
            password_hash,
        }
    }
}

impl From<event::Model> for Event {
    fn from(m: event::Model) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            name: m.name,
            description: m.description,
            date: m.date,
            location: m.location,
        }
    }
}

impl From<attendee::Model> for Attendee {
    fn from(m: attendee::Model) -> Self {
        Self {
            id: m.id,
            event_id: m.event_id,
            user_id: m.user_id,
        }
    }
}
