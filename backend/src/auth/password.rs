//! Password hashing using argon2
//!
//! Hashing and verification are CPU-bound and always run on the blocking
//! pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

/// Hash checked against when the account does not exist, so unknown e-mails
/// take as long to reject as wrong passwords.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_blocking("not-a-real-password").ok());

fn hash_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct PasswordService;

impl PasswordService {
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Burn a verification for a login attempt on an unknown account
    pub async fn verify_dummy(password: String) {
        let _ = tokio::task::spawn_blocking(move || {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_blocking(&password, hash);
            }
        })
        .await;
    }
}
