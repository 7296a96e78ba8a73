//! Collaborator seams consulted while assembling the account menu.
//!
//! The menu helper never talks to authentication, the ILS, or other view
//! helpers directly. Instead it reads them through the traits below, bundled
//! per request in a [`MenuContext`]. The `site` module provides
//! configuration-backed implementations; tests supply their own fakes.

use serde::{Deserialize, Serialize};

/// A logged-in catalog user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Catalog account name.
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// ILS patron record linked to a catalog user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    /// Library card / ILS login used by the ILS driver.
    pub cat_username: String,
}

impl Patron {
    pub fn new(cat_username: impl Into<String>) -> Self {
        Self {
            cat_username: cat_username.into(),
        }
    }
}

/// Parameters passed along with ILS capability and function checks.
///
/// Carries the patron only when a user is logged in and has an ILS login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityParams {
    pub patron: Option<Patron>,
}

/// ILS offline modes. `None` from [`IlsConnection::offline_mode`] means online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfflineMode {
    /// The ILS is temporarily unreachable; account pages show a notice.
    #[serde(rename = "ils-offline")]
    IlsOffline,
    /// The catalog runs without any ILS.
    #[serde(rename = "ils-none")]
    IlsNone,
}

/// Mode of the user list (favorites) feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserListMode {
    #[default]
    Enabled,
    Disabled,
    PublicOnly,
    PrivateOnly,
}

/// Whether saved search history is offered to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedSearchSetting {
    #[default]
    Enabled,
    Disabled,
}

/// Current user lookup.
pub trait AuthHelper: Send + Sync {
    /// The logged-in user, if any.
    fn user(&self) -> Option<User>;

    /// The ILS patron for the logged-in user, if the ILS login succeeds.
    fn ils_patron(&self) -> Option<Patron>;
}

/// Feature queries against the integrated library system.
pub trait IlsConnection: Send + Sync {
    /// Offline mode of the connection, `None` when fully online.
    fn offline_mode(&self) -> Option<OfflineMode>;

    /// Whether the ILS driver supports the named method.
    fn check_capability(&self, capability: &str, params: &CapabilityParams) -> bool;

    /// Whether the named ILS function is configured and enabled.
    fn check_function(&self, function: &str, params: &CapabilityParams) -> bool;
}

/// A saved list shown under the Lists group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListSummary {
    pub id: String,
    pub title: String,
    /// Number of records on the list.
    pub count: u32,
}

/// User list (favorites) settings.
pub trait UserListHelper: Send + Sync {
    fn mode(&self) -> UserListMode;

    /// Saved lists owned by `user`.
    fn lists(&self, _user: &User) -> Vec<UserListSummary> {
        Vec::new()
    }
}

/// Overdrive integration.
pub trait OverdriveHelper: Send + Sync {
    /// Whether the "my Overdrive content" link should be shown.
    fn show_my_content_link(&self) -> bool;
}

/// Account-level feature switches.
pub trait AccountCapabilities: Send + Sync {
    fn library_cards_enabled(&self) -> bool;

    fn saved_search_setting(&self) -> SavedSearchSetting;
}

/// Site-wide settings read by the menu.
pub trait SiteConfig: Send + Sync {
    /// Configured currency code (e.g. "USD"), if any.
    fn default_currency(&self) -> Option<String>;
}

/// Everything the account menu consults for a single render.
#[derive(Clone, Copy)]
pub struct MenuContext<'a> {
    pub auth: &'a dyn AuthHelper,
    pub ils: &'a dyn IlsConnection,
    pub user_list: &'a dyn UserListHelper,
    pub overdrive: &'a dyn OverdriveHelper,
    pub account: &'a dyn AccountCapabilities,
    pub site: &'a dyn SiteConfig,
}

impl std::fmt::Debug for MenuContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuContext")
            .field("user", &self.auth.user())
            .field("offline_mode", &self.ils.offline_mode())
            .field("user_list", &self.user_list.mode())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn offline_mode_uses_catalog_spelling() {
        let mode: OfflineMode = serde_json::from_str("\"ils-none\"").unwrap();
        assert_eq!(mode, OfflineMode::IlsNone);
    }

    #[test]
    fn user_list_mode_snake_case() {
        let mode: UserListMode = serde_json::from_str("\"public_only\"").unwrap();
        assert_eq!(mode, UserListMode::PublicOnly);
    }
}
