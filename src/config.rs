//! Runtime settings, read from `ROCKET_CART_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
pub const DEFAULT_BUFFER_SIZE: usize = 32;
pub const DEFAULT_DATA_DIR: &str = ".rocket-cart";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// What add-product does when the catalog reports no stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
    /// Warn the shopper but add the unit anyway.
    #[default]
    WarnOnly,
    /// Warn the shopper and leave the cart unchanged.
    Abort,
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warn-only" => Ok(Self::WarnOnly),
            "abort" => Ok(Self::Abort),
            other => Err(format!("expected `warn` or `abort`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the cart snapshot is stored under.
    pub storage_key: String,
    /// Capacity of the cart command queue.
    pub buffer_size: usize,
    pub add_stock_policy: StockPolicy,
    /// Directory used by the file-backed store.
    pub data_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            add_stock_policy: StockPolicy::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl CartConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup("ROCKET_CART_STORAGE_KEY") {
            if key.trim().is_empty() {
                return Err(invalid("ROCKET_CART_STORAGE_KEY", key, "must not be empty"));
            }
            config.storage_key = key;
        }

        if let Some(raw) = lookup("ROCKET_CART_BUFFER") {
            config.buffer_size = match raw.trim().parse::<usize>() {
                Ok(0) => return Err(invalid("ROCKET_CART_BUFFER", raw, "must be greater than zero")),
                Ok(size) => size,
                Err(e) => return Err(invalid("ROCKET_CART_BUFFER", raw, e.to_string())),
            };
        }

        if let Some(raw) = lookup("ROCKET_CART_ADD_STOCK_POLICY") {
            config.add_stock_policy = raw
                .parse()
                .map_err(|reason: String| invalid("ROCKET_CART_ADD_STOCK_POLICY", raw.clone(), reason))?;
        }

        if let Some(dir) = lookup("ROCKET_CART_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn invalid(name: &'static str, value: String, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value,
        reason: reason.into(),
    }
}
