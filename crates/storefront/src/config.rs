//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG_PATH` - Product catalog JSON (default: data/data.json)
//! - `STOREFRONT_DATA_DIR` - Directory for persisted cart, recently viewed
//!   and account state. When unset, state is kept in memory only.
//! - `STOREFRONT_FREE_SHIPPING_THRESHOLD` - Subtotal for free shipping (default: 1500.00)
//! - `STOREFRONT_SHIPPING_FEE` - Flat shipping fee below the threshold (default: 29.99)
//! - `STOREFRONT_CURRENCY` - Currency of cart summaries (default: TRY)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use bazaar_core::CurrencyCode;

use crate::services::ShippingRules;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Product catalog document
    pub catalog_path: PathBuf,
    /// Persisted state directory; `None` keeps state in memory
    pub data_dir: Option<PathBuf>,
    /// Cart shipping pricing
    pub shipping: ShippingRules,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            catalog_path: PathBuf::from("data/data.json"),
            data_dir: None,
            shipping: ShippingRules::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parse_or("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or("STOREFRONT_PORT", "3000")?;
        let catalog_path =
            PathBuf::from(env.or_default("STOREFRONT_CATALOG_PATH", "data/data.json"));
        let data_dir = env.optional("STOREFRONT_DATA_DIR").map(PathBuf::from);

        let shipping = ShippingRules {
            free_threshold: env
                .parse_or::<Decimal>("STOREFRONT_FREE_SHIPPING_THRESHOLD", "1500.00")?,
            fee: env.parse_or::<Decimal>("STOREFRONT_SHIPPING_FEE", "29.99")?,
            currency: CurrencyCode::parse(&env.or_default("STOREFRONT_CURRENCY", "TRY")),
        };
        if shipping.free_threshold.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_FREE_SHIPPING_THRESHOLD".to_string(),
                "must not be negative".to_string(),
            ));
        }
        if shipping.fee.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SHIPPING_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            catalog_path,
            data_dir,
            shipping,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Open the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created.
    pub fn storage(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        match &self.data_dir {
            Some(dir) => Ok(Arc::new(FileStore::open(dir)?)),
            None => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with the usual lookup helpers.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.catalog_path, PathBuf::from("data/data.json"));
        assert!(config.data_dir.is_none());
        assert_eq!(config.shipping, ShippingRules::default());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_DATA_DIR", "/var/lib/bazaar"),
            ("STOREFRONT_FREE_SHIPPING_THRESHOLD", "1000"),
            ("STOREFRONT_SHIPPING_FEE", "0"),
            ("STOREFRONT_CURRENCY", "usd"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/bazaar")));
        assert_eq!(config.shipping.free_threshold, Decimal::from(1000));
        assert_eq!(config.shipping.fee, Decimal::ZERO);
        assert_eq!(config.shipping.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = config_from(&[("STOREFRONT_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_negative_fee_rejected() {
        let err = config_from(&[("STOREFRONT_SHIPPING_FEE", "-1")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_SHIPPING_FEE"
        ));
    }

    #[test]
    fn test_storage_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_dir: Some(dir.path().join("state")),
            ..StorefrontConfig::default()
        };

        let storage = config.storage().unwrap();
        storage.set("cart", "[]").unwrap();
        assert!(dir.path().join("state").join("cart.json").exists());
    }
}
