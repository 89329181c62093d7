use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ClientError;

/// Maximum number of catalog cards rendered at once.
pub const CATALOG_CAP: usize = 12;

/// Avatars handed out when the server has none on record for a user.
pub const DEFAULT_FALLBACK_AVATARS: [&str; 5] = [
    "/avatar/avatar1.jpg",
    "/avatar/avatar2.jpg",
    "/avatar/avatar3.jpg",
    "/avatar/avatar4.jpg",
    "/avatar/avatar5.jpg",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the project API, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    pub catalog_cap: usize,
    pub fallback_avatars: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            catalog_cap: CATALOG_CAP,
            fallback_avatars: DEFAULT_FALLBACK_AVATARS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(raw: &str) -> Result<Self, ClientError> {
        let config: ClientConfig =
            toml::from_str(raw).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        self.base_url()?;
        if self.catalog_cap == 0 {
            return Err(ClientError::Config("catalog_cap must be at least 1".into()));
        }
        if self.fallback_avatars.is_empty() {
            return Err(ClientError::Config(
                "fallback_avatars must list at least one avatar".into(),
            ));
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| ClientError::Config(format!("Invalid api_base_url '{}': {}", self.api_base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "api_base_url '{}' cannot be used as a base",
                self.api_base_url
            )));
        }
        Ok(url)
    }
}
