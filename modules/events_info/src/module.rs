use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info, warn};
use utoipa::OpenApi;

use crate::api::rest::{openapi::ApiDoc, routes};
use crate::auth::{Argon2Hasher, AuthService, PasswordHasher, TokenAuthority};
use crate::config::{EventsInfoConfig, MAX_TOKEN_TTL_HOURS};
use crate::contract::client::EventsInfoApi;
use crate::domain::service::Service;
use crate::gateways::local::EventsInfoLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaOrmAttendeesRepository, SeaOrmEventsRepository, SeaOrmUsersRepository,
};

/// Events module: wires the SeaORM repositories into the domain service and
/// the authentication gate, and exposes them over REST and in-process.
#[derive(Clone)]
pub struct EventsInfo {
    service: Arc<Service>,
    auth: Arc<AuthService>,
}

impl EventsInfo {
    pub fn new(db: DatabaseConnection, cfg: EventsInfoConfig) -> anyhow::Result<Self> {
        Self::with_hasher(db, cfg, Arc::new(Argon2Hasher::default()))
    }

    pub fn with_hasher(
        db: DatabaseConnection,
        cfg: EventsInfoConfig,
        hasher: Arc<dyn PasswordHasher>,
    ) -> anyhow::Result<Self> {
        info!("Initializing events_info module");

        if cfg.jwt_secret.is_empty() {
            anyhow::bail!("events_info.jwt_secret must not be empty");
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&cfg.token_ttl_hours) {
            anyhow::bail!(
                "events_info.token_ttl_hours must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_HOURS,
                cfg.token_ttl_hours
            );
        }
        if cfg.uses_default_secret() {
            warn!("events_info.jwt_secret is not set; falling back to the built-in default secret");
        }
        debug!(token_ttl_hours = cfg.token_ttl_hours, "Loaded events_info config");

        // Wire repositories (infra) to domain ports
        let users = Arc::new(SeaOrmUsersRepository::new(db.clone()));
        let events = Arc::new(SeaOrmEventsRepository::new(db.clone()));
        let attendees = Arc::new(SeaOrmAttendeesRepository::new(db));

        let tokens = TokenAuthority::new(
            cfg.jwt_secret.as_bytes(),
            chrono::Duration::hours(cfg.token_ttl_hours),
        );
        let auth = AuthService::new(users.clone(), hasher, tokens);
        let service = Service::new(users, events, attendees);

        Ok(Self {
            service: Arc::new(service),
            auth: Arc::new(auth),
        })
    }

    /// Apply pending migrations.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running events_info database migrations");
        Migrator::up(db, None).await?;
        info!("Events database migrations completed successfully");
        Ok(())
    }

    /// Roll back every applied migration.
    pub async fn rollback(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Rolling back events_info database migrations");
        Migrator::down(db, None).await?;
        Ok(())
    }

    pub fn router(&self) -> axum::Router {
        info!("Registering events_info REST routes");
        routes::register_routes(self.service.clone(), self.auth.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn EventsInfoApi> {
        Arc::new(EventsInfoLocalClient::new(
            self.service.clone(),
            self.auth.clone(),
        ))
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn auth(&self) -> Arc<AuthService> {
        self.auth.clone()
    }
}
