//! Salted password hashing with Argon2id.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::error;

use crate::error::TrackerError;

/// Hashes and verifies account passwords. Output is a PHC string
/// (`$argon2id$v=19$...`) carrying its own salt and parameters.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// OWASP minimum memory cost: 19 MiB
    const MEMORY_COST: u32 = 19_456;
    const TIME_COST: u32 = 2;
    const PARALLELISM: u32 = 1;

    pub fn new() -> Self {
        Self::with_params(Self::MEMORY_COST, Self::TIME_COST, Self::PARALLELISM)
            .unwrap_or_else(|_| Self {
                params: Params::default(),
            })
    }

    /// Custom cost parameters, mainly so tests can hash cheaply.
    pub fn with_params(
        memory_cost: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, TrackerError> {
        let params = Params::new(memory_cost, time_cost, parallelism, None)
            .map_err(|e| TrackerError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash on the blocking pool so the runtime threads stay free.
    pub async fn hash(&self, password: String) -> Result<String, TrackerError> {
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
        })
        .await
        .map_err(|e| {
            error!(error = %e, "password hash task panicked");
            TrackerError::PasswordHash(e.to_string())
        })?
        .map_err(|e| TrackerError::PasswordHash(e.to_string()))
    }

    /// `Ok(false)` for a wrong password; `Err` only if the stored hash is unreadable.
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, TrackerError> {
        tokio::task::spawn_blocking(move || {
            let parsed =
                PasswordHash::new(&hash).map_err(|e| TrackerError::PasswordHash(e.to_string()))?;
            // parameters are read back from the PHC string
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| {
            error!(error = %e, "password verify task panicked");
            TrackerError::PasswordHash(e.to_string())
        })?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_params(4096, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = cheap();
        let hash = hasher.hash("hunter2".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("hunter2".to_string(), hash.clone()).await.unwrap());
        assert!(!hasher.verify("hunter3".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let hasher = cheap();
        let a = hasher.hash("same".to_string()).await.unwrap();
        let b = hasher.hash("same".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn garbage_hash_is_an_error() {
        let hasher = cheap();
        let res = hasher.verify("pw".to_string(), "not-a-hash".to_string()).await;
        assert!(matches!(res, Err(TrackerError::PasswordHash(_))));
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert!(PasswordHasher::with_params(1, 0, 0).is_err());
    }
}
