//! Client configuration.
//!
//! Lookup order:
//! 1. A TOML document stored in `localStorage` under [`OVERRIDE_KEY`]
//! 2. The default document embedded in the bundle

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const OVERRIDE_KEY: &str = "admin_client_config";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[lists]
page_size = 10
debounce_ms = 500
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub lists: ListDefaults,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    /// Full backend origin; when set, `port` and the window location are ignored.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListDefaults {
    pub page_size: u32,
    pub debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                port: 3000,
                base_url: None,
            },
            lists: ListDefaults {
                page_size: 10,
                debounce_ms: 500,
            },
        }
    }
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.lists.debounce_ms)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("lists.page_size must be greater than zero")]
    ZeroPageSize,
}

pub fn parse_config(text: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(text)?;
    if config.lists.page_size == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    Ok(config)
}

fn stored_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(OVERRIDE_KEY)
        .ok()?
}

/// Load configuration, preferring a stored override that parses.
pub fn load_config() -> ClientConfig {
    if let Some(text) = stored_override() {
        match parse_config(&text) {
            Ok(config) => {
                log::info!("Using client config override from localStorage");
                return config;
            }
            Err(e) => log::warn!("Ignoring stored config override: {}", e),
        }
    }

    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Embedded config is invalid ({}), using built-in values", e);
        ClientConfig::default()
    })
}

static CONFIG: Lazy<ClientConfig> = Lazy::new(load_config);

/// Process-wide configuration, loaded on first use.
pub fn config() -> &'static ClientConfig {
    &CONFIG
}
