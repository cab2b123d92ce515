//! Layered runtime configuration.
//!
//! Sources, later ones winning:
//! - built-in defaults (`Config::default()`)
//! - `config.toml` in the working directory, if present
//! - environment variables prefixed `BINVENTORY_`, nested keys split on `__`
//!   (e.g. `BINVENTORY_QR__BASE_URL=https://bins.example.org`)

use crate::error::InventoryError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "BINVENTORY_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub qr: QrConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Max accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:inventory.db".to_string(),
            loglevel: "info".to_string(),
            body_limit: 64 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QrConfig {
    /// Prefix of the link encoded into every bin label.
    /// Fixed for the process lifetime; changing it leaves stored codes stale
    /// until `regenerate_on_start` or a bin edit re-renders them.
    pub base_url: Url,
    pub min_dimension: u32,
    pub regenerate_on_start: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000").expect("static default URL is valid"),
            min_dimension: 200,
            regenerate_on_start: false,
        }
    }
}

impl Config {
    /// Load from defaults, `config.toml` and the environment.
    pub fn load() -> Result<Self, InventoryError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, InventoryError> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), InventoryError> {
        if !matches!(self.qr.base_url.scheme(), "http" | "https") {
            return Err(InventoryError::Validation(format!(
                "qr.base_url must be an http(s) URL, got `{}`",
                self.qr.base_url
            )));
        }
        if self.basic.body_limit == 0 {
            return Err(InventoryError::Validation(
                "basic.body_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
