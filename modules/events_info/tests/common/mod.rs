#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use events_info::auth::Argon2Hasher;
use events_info::config::EventsInfoConfig;
use events_info::model::{Identity, NewEvent, Registration, User};
use events_info::EventsInfo;

pub const SECRET: &str = "test-secret";

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every query on the same in-memory file.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    EventsInfo::migrate(&db).await.expect("migrate");
    db
}

pub async fn setup_module() -> EventsInfo {
    let db = setup_db().await;
    let cfg = EventsInfoConfig {
        jwt_secret: SECRET.into(),
        ..Default::default()
    };
    EventsInfo::with_hasher(db, cfg, Arc::new(Argon2Hasher::fast())).expect("module")
}

pub fn registration(name: &str, email: &str) -> Registration {
    Registration {
        name: name.into(),
        email: email.into(),
        password: "password1".into(),
    }
}

pub async fn register(module: &EventsInfo, name: &str, email: &str) -> (User, Identity) {
    let user = module
        .auth()
        .register(registration(name, email))
        .await
        .expect("register");
    let identity = Identity { user_id: user.id };
    (user, identity)
}

pub fn new_event(name: &str) -> NewEvent {
    NewEvent {
        name: name.into(),
        description: "A gathering of fellow enthusiasts".into(),
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        location: "Berlin".into(),
    }
}
