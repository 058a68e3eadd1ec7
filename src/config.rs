use std::env;
use std::fmt;

use crate::providers::digitalocean::{DEFAULT_API_URL, DigitalOceanConfig};

#[derive(Clone)]
pub struct Config {
    pub api_token: String,
    pub zone: String,
    pub api_url: String,
    pub per_page: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        Ok(Config {
            api_token: lookup("DO_AUTH_TOKEN")?,
            zone: lookup("ZONE")?,
            api_url: lookup("DO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            per_page: lookup("DO_PER_PAGE").ok().and_then(|v| v.parse().ok()),
        })
    }

    pub fn provider_config(&self) -> DigitalOceanConfig {
        DigitalOceanConfig {
            api_token: self.api_token.clone(),
            api_url: self.api_url.clone(),
            per_page: self.per_page,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("zone", &self.zone)
            .field("api_url", &self.api_url)
            .field("per_page", &self.per_page)
            .finish()
    }
}
