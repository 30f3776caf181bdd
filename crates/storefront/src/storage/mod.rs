//! Persistence adapters for storefront state.
//!
//! All persisted state is a handful of string values under well-known keys,
//! each holding a JSON document. [`KeyValueStore`] is the seam between the
//! stores and the medium: [`MemoryStore`] for tests and ephemeral servers,
//! [`FileStore`] for a data directory that survives restarts.
//!
//! # Keys
//!
//! - [`keys::CART`] - JSON list of cart line items
//! - [`keys::RECENTLY_VIEWED`] - JSON list of recently viewed products (max 4)
//! - [`keys::USERS`] - JSON list of registered accounts
//! - [`keys::LOGGED_IN_USER`] - JSON object of the signed-in account
//! - [`keys::TOKEN`] - session marker, any non-empty value means signed in

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys shared by all stores.
pub mod keys {
    /// Cart line items.
    pub const CART: &str = "cart";

    /// Recently viewed products.
    pub const RECENTLY_VIEWED: &str = "recentlyViewedProducts";

    /// Registered accounts.
    pub const USERS: &str = "users";

    /// Signed-in account.
    pub const LOGGED_IN_USER: &str = "loggedInUser";

    /// Session token.
    pub const TOKEN: &str = "token";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A value could not be serialized before writing.
    #[error("failed to serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The in-process lock guarding the backend was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued persistent store.
///
/// Implementations must be safe to share between threads. Writes replace the
/// whole value; there is no partial update.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read a JSON value stored under `key`.
///
/// A missing key yields `None`. A value that fails to parse is logged and
/// also yields `None`, so corrupted state degrades to "nothing stored".
///
/// # Errors
///
/// Returns `StorageError` only if the backend itself fails.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored value");
            Ok(None)
        }
    }
}

/// Read a JSON list stored under `key`, treating missing or malformed data as empty.
///
/// # Errors
///
/// Returns `StorageError` only if the backend itself fails.
pub fn read_list<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    Ok(read_json(store, key)?.unwrap_or_default())
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
