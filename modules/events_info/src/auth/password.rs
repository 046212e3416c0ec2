use anyhow::anyhow;
use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher as _,
        PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hashing port used by the authentication gate.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;
    /// `Ok(false)` on mismatch; `Err` only if `hash` is unusable.
    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool>;
}

/// Argon2id with a random per-password salt, PHC string output.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    /// Cheap parameters for tests.
    pub fn fast() -> Self {
        // 8 KiB memory, 1 pass, 1 lane are the smallest accepted values
        match Params::new(8, 1, 1, None) {
            Ok(params) => Self { params },
            Err(_) => Self::default(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("password hashing failed: {e}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("stored hash unusable: {e}"))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(anyhow!("password verification failed: {e}")),
        }
    }
}
