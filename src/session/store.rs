//! Keyring operations for client-side session storage.
//!
//! Uses the `keyring` crate to hold the API token and the signed-in user's
//! profile fields in the OS keyring, never on disk. Storage keys mirror the
//! web client's storage item names.

use keyring::Entry;
use thiserror::Error;

use crate::api::types::UserResponse;

/// Keyring service name for all surat client entries.
const SERVICE_NAME: &str = "surat-client";

/// Key for the API session token.
const TOKEN_KEY: &str = "apiToken";

/// Storage keys for the four profile fields persisted by the session gate.
const PROFILE_KEYS: [&str; 4] = ["idUser", "namaUser", "namaBagian", "namaKelompok"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("keyring operation failed: {0}")]
    OperationFailed(String),
}

impl From<keyring::Error> for StoreError {
    fn from(err: keyring::Error) -> Self {
        StoreError::OperationFailed(err.to_string())
    }
}

/// The four profile fields persisted after a successful identity check.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProfile {
    pub id_user: String,
    pub nama_user: String,
    pub nama_bagian: String,
    pub nama_kelompok: String,
}

impl StoredProfile {
    /// Project the stored fields out of a full identity-check response.
    pub fn from_user(user: &UserResponse) -> Self {
        Self {
            id_user: user.id_user.to_string(),
            nama_user: user.nama_user.clone(),
            nama_bagian: user.bagian.nama_bagian.clone(),
            nama_kelompok: user.kelompok.nama_kelompok.clone(),
        }
    }
}

/// Client-side storage seam for the session gate.
///
/// In production this is the OS keyring. Tests substitute an in-memory
/// implementation that records what was stored.
pub trait ProfileStore {
    /// Persist the four profile fields.
    fn store_profile(&self, profile: &StoredProfile) -> Result<(), StoreError>;

    /// Remove any stored profile fields. Idempotent.
    fn clear_profile(&self) -> Result<(), StoreError>;
}

/// Keyring-backed store used by the running application.
pub struct KeyringStore;

impl ProfileStore for KeyringStore {
    fn store_profile(&self, profile: &StoredProfile) -> Result<(), StoreError> {
        set_value("idUser", &profile.id_user)?;
        set_value("namaUser", &profile.nama_user)?;
        set_value("namaBagian", &profile.nama_bagian)?;
        set_value("namaKelompok", &profile.nama_kelompok)?;
        Ok(())
    }

    fn clear_profile(&self) -> Result<(), StoreError> {
        for key in PROFILE_KEYS {
            delete_value(key)?;
        }
        Ok(())
    }
}

/// Store the API token in the keyring.
pub fn store_token(token: &str) -> Result<(), StoreError> {
    set_value(TOKEN_KEY, token)
}

/// Retrieve the stored API token.
///
/// Returns `None` if no entry exists (never logged in or logged out).
pub fn get_token() -> Result<Option<String>, StoreError> {
    let entry = Entry::new(SERVICE_NAME, TOKEN_KEY)?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(StoreError::from(e)),
    }
}

/// Delete the stored API token. Idempotent.
pub fn delete_token() -> Result<(), StoreError> {
    delete_value(TOKEN_KEY)
}

fn set_value(key: &str, value: &str) -> Result<(), StoreError> {
    let entry = Entry::new(SERVICE_NAME, key)?;
    entry.set_password(value)?;
    Ok(())
}

fn delete_value(key: &str) -> Result<(), StoreError> {
    let entry = Entry::new(SERVICE_NAME, key)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()), // Already deleted, idempotent
        Err(e) => Err(StoreError::from(e)),
    }
}
