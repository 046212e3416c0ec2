use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::auth::error::AuthError;
use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenAuthority;
use crate::contract::model::{Identity, Registration, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{NewUserRecord, StoreError, UsersRepository};
use crate::domain::validation::{self, min_chars, MIN_PASSWORD, MIN_USER_NAME};

/// Authentication gate: account registration, credential login and
/// token-to-identity resolution.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenAuthority,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenAuthority,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenAuthority {
        &self.tokens
    }

    #[instrument(
        name = "events_info.service.register",
        skip(self, registration),
        fields(email = %registration.email)
    )]
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        info!("Registering new user");

        min_chars("name", &registration.name, MIN_USER_NAME)?;
        validation::email(&registration.email)?;
        min_chars("password", &registration.password, MIN_PASSWORD)?;

        let password_hash = self.hash_password(registration.password).await?;

        let record = NewUserRecord {
            name: registration.name,
            email: registration.email,
            password_hash,
        };
        let email = record.email.clone();

        let user = match self.users.insert(record).await {
            Ok(user) => user,
            Err(StoreError::Conflict) => return Err(DomainError::email_already_exists(email)),
            Err(e) => return Err(e.into()),
        };

        info!("Successfully registered user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "events_info.service.login", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        validation::email(email)?;
        min_chars("password", password, MIN_PASSWORD)?;

        let stored = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::email_not_found(email))?;

        if !self
            .verify_password(password.to_owned(), stored.password_hash)
            .await?
        {
            warn!(user_id = stored.user.id, "Login rejected: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(stored.user.id)
            .map_err(|e| DomainError::internal(format!("token signing failed: {e}")))?;

        info!(user_id = stored.user.id, "Issued identity token");
        Ok(token)
    }

    /// Resolve a raw bearer token. Only signature and expiry are checked.
    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let user_id = self.tokens.verify(token)?;
        debug!(user_id, "Token accepted");
        Ok(Identity { user_id })
    }

    // Argon2 is CPU-bound; keep it off the async workers
    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?
            .map_err(|e| DomainError::internal(format!("{e:#}")))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, DomainError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?
            .map_err(|e| DomainError::internal(format!("{e:#}")))
    }
}
