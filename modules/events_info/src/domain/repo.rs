use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{Attendee, Event, NewEvent, User};

/// Failure reported by a persistence port.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated")]
    Conflict,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User row as the credential store keeps it.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Credential store port.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Persist a user; `StoreError::Conflict` if the email is taken.
    async fn insert(&self, record: NewUserRecord) -> StoreResult<User>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    /// Users for the given ids, ascending by id. Unknown ids are skipped.
    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<User>>;
}

/// Event store port. Mutations carry the owner the caller observed so the
/// store can refuse a write whose precondition no longer holds.
#[async_trait]
pub trait EventsRepository: Send + Sync {
    async fn insert(&self, owner_id: i64, new_event: NewEvent) -> StoreResult<Event>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>>;
    /// All events, ascending by id.
    async fn list_all(&self) -> StoreResult<Vec<Event>>;
    /// Events for the given ids, ascending by id. Unknown ids are skipped.
    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<Event>>;
    /// Overwrite mutable fields of `event` where `(id, owner_id)` matches.
    /// Returns false if no row matched.
    async fn update(&self, event: &Event, expected_owner: i64) -> StoreResult<bool>;
    /// Delete where `(id, owner_id)` matches. Returns false if no row matched.
    async fn delete(&self, id: i64, expected_owner: i64) -> StoreResult<bool>;
}

/// Attendee store port.
#[async_trait]
pub trait AttendeesRepository: Send + Sync {
    /// `StoreError::Conflict` if the pair already exists.
    async fn insert(&self, event_id: i64, user_id: i64) -> StoreResult<Attendee>;
    async fn find(&self, event_id: i64, user_id: i64) -> StoreResult<Option<Attendee>>;
    async fn list_for_event(&self, event_id: i64) -> StoreResult<Vec<Attendee>>;
    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Attendee>>;
    /// Returns true if a row was deleted.
    async fn delete(&self, event_id: i64, user_id: i64) -> StoreResult<bool>;
}
