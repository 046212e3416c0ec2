//! SeaORM-backed implementations of the domain ports.
//!
//! Each repository is generic over `C: ConnectionTrait`, so it can be built
//! with a `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use crate::contract::model::{Attendee, Event, NewEvent, User};
use crate::domain::repo::{
    AttendeesRepository, EventsRepository, NewUserRecord, StoreError, StoreResult,
    UserCredentials, UsersRepository,
};
use crate::infra::storage::entity::{attendee, event, user};

/// Split unique-constraint violations from every other store failure.
fn classify(err: DbErr, what: &'static str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict,
        _ => StoreError::Other(anyhow::Error::new(err).context(what)),
    }
}

// ---------------------------------------------------------------- users

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, record: NewUserRecord) -> StoreResult<User> {
        let m = user::ActiveModel {
            id: NotSet,
            email: Set(record.email),
            name: Set(record.name),
            password_hash: Set(record.password_hash),
        };
        let saved = m
            .insert(&self.conn)
            .await
            .map_err(|e| classify(e, "insert user failed"))?;
        Ok(saved.into())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserCredentials>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find user by id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<User>> {
        let rows = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(user::Column::Id)
            .all(&self.conn)
            .await
            .context("find many users failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------- events

pub struct SeaOrmEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> EventsRepository for SeaOrmEventsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, owner_id: i64, new_event: NewEvent) -> StoreResult<Event> {
        let m = event::ActiveModel {
            id: NotSet,
            owner_id: Set(owner_id),
            name: Set(new_event.name),
            description: Set(new_event.description),
            date: Set(new_event.date),
            location: Set(new_event.location),
        };
        let saved = m
            .insert(&self.conn)
            .await
            .map_err(|e| classify(e, "insert event failed"))?;
        Ok(saved.into())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        let found = event::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find event by id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> StoreResult<Vec<Event>> {
        let rows = event::Entity::find()
            .order_by_asc(event::Column::Id)
            .all(&self.conn)
            .await
            .context("list events failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_many(&self, ids: &[i64]) -> StoreResult<Vec<Event>> {
        let rows = event::Entity::find()
            .filter(event::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(event::Column::Id)
            .all(&self.conn)
            .await
            .context("find many events failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, e: &Event, expected_owner: i64) -> StoreResult<bool> {
        // Compare-and-swap on (id, owner_id); owner_id itself is never written
        let res = event::Entity::update_many()
            .col_expr(event::Column::Name, Expr::value(e.name.clone()))
            .col_expr(event::Column::Description, Expr::value(e.description.clone()))
            .col_expr(event::Column::Date, Expr::value(e.date))
            .col_expr(event::Column::Location, Expr::value(e.location.clone()))
            .filter(event::Column::Id.eq(e.id))
            .filter(event::Column::OwnerId.eq(expected_owner))
            .exec(&self.conn)
            .await
            .context("update event failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64, expected_owner: i64) -> StoreResult<bool> {
        let res = event::Entity::delete_many()
            .filter(event::Column::Id.eq(id))
            .filter(event::Column::OwnerId.eq(expected_owner))
            .exec(&self.conn)
            .await
            .context("delete event failed")?;
        Ok(res.rows_affected > 0)
    }
}

// ---------------------------------------------------------------- attendees

pub struct SeaOrmAttendeesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAttendeesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> AttendeesRepository for SeaOrmAttendeesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, event_id: i64, user_id: i64) -> StoreResult<Attendee> {
        let m = attendee::ActiveModel {
            id: NotSet,
            event_id: Set(event_id),
            user_id: Set(user_id),
        };
        let saved = m
            .insert(&self.conn)
            .await
            .map_err(|e| classify(e, "insert attendee failed"))?;
        Ok(saved.into())
    }

    async fn find(&self, event_id: i64, user_id: i64) -> StoreResult<Option<Attendee>> {
        let found = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(event_id))
            .filter(attendee::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("find attendee failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_for_event(&self, event_id: i64) -> StoreResult<Vec<Attendee>> {
        let rows = attendee::Entity::find()
            .filter(attendee::Column::EventId.eq(event_id))
            .order_by_asc(attendee::Column::Id)
            .all(&self.conn)
            .await
            .context("list attendees for event failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Attendee>> {
        let rows = attendee::Entity::find()
            .filter(attendee::Column::UserId.eq(user_id))
            .order_by_asc(attendee::Column::Id)
            .all(&self.conn)
            .await
            .context("list attendees for user failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, event_id: i64, user_id: i64) -> StoreResult<bool> {
        let res = attendee::Entity::delete_many()
            .filter(attendee::Column::EventId.eq(event_id))
            .filter(attendee::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("delete attendee failed")?;
        Ok(res.rows_affected > 0)
    }
}
