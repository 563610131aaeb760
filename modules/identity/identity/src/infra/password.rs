//! Secret hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, so parameters and salt travel with the
//! hash. Both operations are CPU-bound and run on the blocking pool.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;

use crate::domain::error::DomainError;

const SALT_LEN: usize = 16;

/// Hash a secret into a PHC string.
///
/// # Errors
/// Returns `DomainError::Internal` if hashing fails or the blocking task panics.
pub async fn hash_secret(secret: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hash_blocking(&secret))
        .await
        .map_err(|e| DomainError::internal(format!("hashing task failed: {e}")))?
}

/// Check a secret against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only a corrupt stored hash is an error.
///
/// # Errors
/// Returns `DomainError::Internal` if the stored hash cannot be parsed.
pub async fn verify_secret(secret: String, stored_hash: String) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || verify_blocking(&secret, &stored_hash))
        .await
        .map_err(|e| DomainError::internal(format!("verification task failed: {e}")))?
}

fn hash_blocking(secret: &str) -> Result<String, DomainError> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt)
        .map_err(|e| DomainError::internal(format!("salt encoding failed: {e}")))?;

    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| DomainError::internal(format!("hashing failed: {e}")))?;

    Ok(hash.to_string())
}

fn verify_blocking(secret: &str, stored_hash: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| DomainError::internal(format!("stored hash is corrupt: {e}")))?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}
