//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shop_cache::FileStore;
use shop_commerce::prelude::*;
use shop_data::{FetchClient, ReqwestTransport};

use crate::config::{ShopConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in effect, if any.
    pub config_path: Option<PathBuf>,
    /// Toasts raised by commands.
    pub notifications: NotificationChannel,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (ShopConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            },
        };
        let config = config.with_env_overrides();
        config.validate().with_context(|| match &config_path {
            Some(path) => format!("Invalid config: {}", path.display()),
            None => "Invalid config".to_string(),
        })?;

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        let notifications = NotificationChannel::new(config.notifications.dismiss_after());

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            notifications,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(ShopConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    match ShopConfig::load(candidate.to_str()?) {
                        Ok(config) => return Some((config, candidate)),
                        Err(e) => tracing::warn!(path = %candidate.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Catalog client for the configured endpoint.
    pub fn catalog(&self) -> Result<CatalogClient> {
        let transport = ReqwestTransport::new(self.config.catalog.timeout())
            .context("Failed to build HTTP client")?;
        let http = FetchClient::with_transport(Arc::new(transport))
            .with_base_url(self.config.catalog.base_url.clone());
        Ok(CatalogClient::with_http(http))
    }

    /// Cart store backed by the configured storage document.
    pub fn cart(&self) -> Result<CartStore<FileStore>> {
        let path = self.resolve_path(&self.config.storage.path);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))?;
        Ok(CartStore::open_with_key(store, self.config.storage.cart_key.clone()))
    }

    /// Fetch the whole catalog, reporting a page-level error on failure.
    pub async fn load_products(&self) -> Result<Vec<Product>> {
        let catalog = self.catalog()?;
        let spinner = self.output.spinner("Loading products...");

        let mut page = PageLoader::new();
        let ticket = page.begin();
        page.settle(ticket, catalog.list_products().await);
        spinner.finish_and_clear();

        match page.into_state() {
            PageState::Ready(products) => Ok(products),
            PageState::Failed(message) => anyhow::bail!(message),
            _ => anyhow::bail!("Failed to load products. Please try again later."),
        }
    }

    /// Dismiss whatever toast is showing and hand it back.
    pub fn take_notification(&self) -> Option<Notification> {
        let toast = self.notifications.current()?;
        self.notifications.dismiss(toast.handle());
        Some(toast)
    }

    /// Print and dismiss whatever toast is showing.
    pub fn flush_notification(&self) {
        if let Some(toast) = self.take_notification() {
            self.output.notification(&toast);
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
