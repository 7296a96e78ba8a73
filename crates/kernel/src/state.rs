//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::menu::{AccountMenu, MenuConfig};
use crate::site::{Site, SiteSettings};
use crate::theme::{RouteTable, ThemeEngine};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    /// Account menu helper with its theme.
    account_menu: AccountMenu,

    /// Site-backed collaborators (ILS, lists, feature switches).
    site: Site,
}

impl AppState {
    /// Load site settings, menu configuration, and templates.
    pub fn new(config: &Config) -> Result<Self> {
        let settings = SiteSettings::load(config.site_config.as_deref())
            .context("failed to load site configuration")?;

        let menu_config = MenuConfig::load(config.account_menu_config.as_deref())
            .context("failed to load account menu configuration")?;
        info!(groups = menu_config.len(), "account menu configuration loaded");

        let routes = RouteTable::new().with_routes(&settings.routes);
        let theme = if config.template_dir.is_dir() {
            ThemeEngine::new(&config.template_dir, routes)?
        } else {
            info!(
                dir = %config.template_dir.display(),
                "template directory missing, using built-in templates"
            );
            ThemeEngine::builtin(routes)?
        };

        Ok(Self::from_parts(
            AccountMenu::new(menu_config, Arc::new(theme)),
            Site::new(settings),
        ))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(account_menu: AccountMenu, site: Site) -> Self {
        Self {
            inner: Arc::new(AppStateInner { account_menu, site }),
        }
    }

    pub fn account_menu(&self) -> &AccountMenu {
        &self.inner.account_menu
    }

    pub fn site(&self) -> &Site {
        &self.inner.site
    }
}
