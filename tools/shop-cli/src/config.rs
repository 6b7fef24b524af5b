//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::cart::DEFAULT_CART_KEY;
use shop_commerce::catalog::DEFAULT_CATALOG_URL;

/// Environment variable that overrides `catalog.base_url`.
pub const CATALOG_URL_ENV: &str = "SHOP_CATALOG_URL";

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Remote catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Toast behaviour.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Reject values that would make every command fail.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.timeout_secs == 0 {
            bail!("catalog.timeout_secs must be at least 1");
        }
        if self.catalog.base_url.trim().is_empty() {
            bail!("catalog.base_url must not be empty");
        }
        if self.storage.cart_key.trim().is_empty() {
            bail!("storage.cart_key must not be empty");
        }
        Ok(())
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_catalog_url_override(std::env::var(CATALOG_URL_ENV).ok())
    }

    fn with_catalog_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.catalog.base_url = url;
        }
        self
    }
}

/// Remote catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Collection endpoint; product detail is `<base_url>/<id>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Storage document, relative to the working directory unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_path() -> String {
    ".shop/storage.json".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            cart_key: default_cart_key(),
        }
    }
}

/// Toast settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// Auto-dismiss delay in milliseconds.
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

fn default_dismiss_after_ms() -> u64 {
    3000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shop CLI configuration

[catalog]
base_url = "{base_url}"
timeout_secs = {timeout}

[storage]
path = "{path}"
cart_key = "{key}"

[notifications]
dismiss_after_ms = {dismiss}
"#,
        base_url = DEFAULT_CATALOG_URL,
        timeout = default_timeout_secs(),
        path = default_storage_path(),
        key = DEFAULT_CART_KEY,
        dismiss = default_dismiss_after_ms(),
    )
}
