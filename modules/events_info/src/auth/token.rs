use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::error::AuthError;

/// Failure to mint a token.
#[derive(Error, Debug)]
pub enum IssueError {
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    #[error(transparent)]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims embedded in identity tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: user id as a decimal string.
    pub sub: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expires at (Unix seconds).
    pub exp: i64,
}

/// Issues and verifies HS256 identity tokens. Stateless: a token is valid
/// while its signature matches and `exp` has not passed.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i64) -> Result<String, IssueError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or(IssueError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Returns the subject id. Does not check that the user still exists.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against `now` below so callers control the clock
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            }
        })?;

        if now.timestamp() > data.claims.exp {
            return Err(AuthError::Expired);
        }

        data.claims.sub.parse().map_err(|_| AuthError::Malformed)
    }
}
