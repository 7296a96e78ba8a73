//! Site configuration and the collaborators it backs.
//!
//! A site YAML file describes what the catalog installation offers:
//!
//! ```yaml
//! site:
//!   default_currency: EUR
//! ils:
//!   offline_mode: ~
//!   capabilities: [getMyTransactions, getMyHolds, getMyFines]
//!   functions: [getMyTransactionHistory, ILLRequests]
//!   patron_required: true
//! user_list:
//!   mode: enabled
//! overdrive:
//!   show_my_content_link: false
//! account:
//!   library_cards: true
//!   saved_searches: enabled
//! routes:
//!   holds-list: /account/holds
//! ```

mod auth;
mod ils;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::{
    AccountCapabilities, AuthHelper, MenuContext, OverdriveHelper, SavedSearchSetting, SiteConfig,
    UserListHelper, UserListMode,
};

pub use auth::RequestAuth;
pub use ils::{IlsSettings, StaticIlsConnection};

/// General site settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub default_currency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserListSection {
    pub mode: UserListMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverdriveSection {
    pub show_my_content_link: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSection {
    pub library_cards: bool,
    pub saved_searches: SavedSearchSetting,
}

/// Everything read from the site configuration file.
///
/// The default mirrors a fresh installation: ILS online but advertising
/// nothing, lists and saved searches enabled, library cards off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub site: SiteSection,
    pub ils: IlsSettings,
    pub user_list: UserListSection,
    pub overdrive: OverdriveSection,
    pub account: AccountSection,
    /// Extra or overridden named routes.
    pub routes: BTreeMap<String, String>,
}

impl SiteSettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(yaml).context("failed to parse site configuration")
    }

    /// Load from an optional path; `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read site configuration {}", path.display()))?;
        let settings = Self::from_yaml_str(&yaml)?;
        info!(path = %path.display(), "site configuration loaded");
        Ok(settings)
    }
}

/// Collaborators backed by [`SiteSettings`].
#[derive(Debug, Clone, Default)]
pub struct Site {
    settings: SiteSettings,
    ils: StaticIlsConnection,
}

impl Site {
    pub fn new(settings: SiteSettings) -> Self {
        let ils = StaticIlsConnection::new(&settings.ils);
        Self { settings, ils }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Menu context for one request.
    pub fn context<'a>(&'a self, auth: &'a dyn AuthHelper) -> MenuContext<'a> {
        MenuContext {
            auth,
            ils: &self.ils,
            user_list: self,
            overdrive: self,
            account: self,
            site: self,
        }
    }
}

impl UserListHelper for Site {
    fn mode(&self) -> UserListMode {
        self.settings.user_list.mode
    }
}

impl OverdriveHelper for Site {
    fn show_my_content_link(&self) -> bool {
        self.settings.overdrive.show_my_content_link
    }
}

impl AccountCapabilities for Site {
    fn library_cards_enabled(&self) -> bool {
        self.settings.account.library_cards
    }

    fn saved_search_setting(&self) -> SavedSearchSetting {
        self.settings.account.saved_searches
    }
}

impl SiteConfig for Site {
    fn default_currency(&self) -> Option<String> {
        self.settings.site.default_currency.clone()
    }
}
