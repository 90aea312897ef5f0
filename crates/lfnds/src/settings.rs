//! # Settings
//!
//! Loads credentials and API location from the environment or a TOML file.
//! Hosts that wire everything by hand never need this module.

use crate::configuration::BaseConfiguration;
use lfnds_core::{codes, ElefundsError, ElefundsResult};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

pub const ENV_CLIENT_ID: &str = "ELEFUNDS_CLIENT_ID";
pub const ENV_API_KEY: &str = "ELEFUNDS_API_KEY";
pub const ENV_API_URL: &str = "ELEFUNDS_API_URL";
pub const ENV_COUNTRYCODE: &str = "ELEFUNDS_COUNTRYCODE";

/// Host-provided SDK settings
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub client_id: u32,
    pub api_key: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub countrycode: Option<String>,
}

impl Settings {
    /// Load from environment variables, reading `.env` first if present
    pub fn from_env() -> ElefundsResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any name → value source
    pub fn from_lookup<F>(lookup: F) -> ElefundsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(ENV_CLIENT_ID)
            .ok_or_else(|| missing(ENV_CLIENT_ID))?
            .trim()
            .parse::<u32>()
            .map_err(|e| {
                ElefundsError::configuration(
                    codes::SETTINGS_INVALID,
                    format!("{} is not a valid client id: {}", ENV_CLIENT_ID, e),
                )
            })?;

        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| missing(ENV_API_KEY))?;

        Ok(Self {
            client_id,
            api_key,
            api_url: lookup(ENV_API_URL).filter(|url| !url.is_empty()),
            countrycode: lookup(ENV_COUNTRYCODE).filter(|cc| !cc.is_empty()),
        })
    }

    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> ElefundsResult<Self> {
        toml::from_str(content).map_err(|e| {
            ElefundsError::configuration(
                codes::SETTINGS_INVALID,
                format!("Failed to parse settings: {}", e),
            )
        })
    }

    /// Push the settings into `configuration` through its validating setters
    pub fn apply(&self, configuration: &mut BaseConfiguration) -> ElefundsResult<()> {
        configuration
            .set_client_id(self.client_id)
            .set_api_key(self.api_key.clone());

        if let Some(url) = &self.api_url {
            configuration.set_api_url(url.clone());
        }
        if let Some(countrycode) = &self.countrycode {
            configuration.set_countrycode(countrycode)?;
        }

        debug!("Applied settings for client {}", self.client_id);
        Ok(())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("countrycode", &self.countrycode)
            .finish()
    }
}

fn missing(name: &str) -> ElefundsError {
    ElefundsError::configuration(codes::SETTINGS_INVALID, format!("{} is not set", name))
}
