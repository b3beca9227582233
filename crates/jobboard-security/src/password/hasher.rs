//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use jobboard_core::{Interface, JobBoardError, JobBoardResult};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Interface + Send + Sync {
    /// Hashes a password with a fresh random salt.
    fn hash(&self, password: &str) -> JobBoardResult<String>;

    /// Verifies a password against a stored PHC string.
    ///
    /// A wrong password is `Ok(false)`; only a malformed hash is an error.
    fn verify(&self, password: &str, hash: &str) -> JobBoardResult<bool>;
}

/// Argon2id password hasher.
#[derive(Component, Clone)]
#[shaku(interface = PasswordHasherInterface)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a password hasher from a memory cost in MiB.
    #[must_use]
    pub fn with_cost(cost_mib: u32) -> Self {
        let params = Params::new(
            cost_mib.saturating_mul(1024), // Memory cost in KiB
            2,                             // Time cost (iterations)
            1,                             // Parallelism
            None,                          // Output length (default)
        )
        .unwrap_or(Params::DEFAULT);

        Self::with_params(params)
    }

    /// Component parameters for registering the hasher in a shaku module.
    #[must_use]
    pub fn parameters(cost_mib: u32) -> PasswordHasherParameters {
        PasswordHasherParameters {
            argon2: Self::with_cost(cost_mib).argon2,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> JobBoardResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| JobBoardError::Internal(format!("Failed to hash password: {}", e)))?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> JobBoardResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| JobBoardError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(JobBoardError::Internal(format!("Password verification error: {}", e))),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
