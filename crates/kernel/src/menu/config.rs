//! Account menu configuration: groups, items, and YAML loading.
//!
//! The configuration is an ordered mapping of group key to group, e.g.:
//!
//! ```yaml
//! Account:
//!   label: Your Account
//!   MenuItems:
//!     - name: holds
//!       route: holds-list
//!       checkMethod: checkHolds
//! ```
//!
//! Older configurations carry a single flat `MenuItems` list at the top
//! level; those replace the items of the default `Account` group.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yml::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::defaults;

/// Key of the group that legacy flat configurations populate.
pub const ACCOUNT_GROUP: &str = "Account";

/// Top-level key used by legacy flat configurations.
const LEGACY_ITEMS_KEY: &str = "MenuItems";

/// Errors raised while loading account menu configuration.
#[derive(Debug, Error)]
pub enum MenuConfigError {
    #[error("failed to read account menu config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("account menu config is not valid YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("account menu config must be a mapping of groups, found {found}")]
    NotAMapping { found: &'static str },

    #[error("account menu group keys must be strings")]
    NonStringKey,

    #[error("account menu group '{group}': {details}")]
    InvalidGroup { group: String, details: String },

    #[error("account menu legacy MenuItems list: {details}")]
    InvalidLegacyItems { details: String },
}

/// Named predicate gating a group or item.
///
/// Spelled in configuration by the helper method name, e.g. `checkHolds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckMethod {
    #[serde(rename = "checkFavorites")]
    Favorites,
    #[serde(rename = "checkCheckedout")]
    Checkedout,
    #[serde(rename = "checkHistoricloans")]
    Historicloans,
    #[serde(rename = "checkHolds")]
    Holds,
    #[serde(rename = "checkStorageRetrievalRequests")]
    StorageRetrievalRequests,
    #[serde(rename = "checkILLRequests")]
    IllRequests,
    #[serde(rename = "checkFines")]
    Fines,
    #[serde(rename = "checkLibraryCards")]
    LibraryCards,
    #[serde(rename = "checkOverdrive")]
    Overdrive,
    #[serde(rename = "checkHistory")]
    History,
    #[serde(rename = "checkLogout")]
    Logout,
    #[serde(rename = "checkUserlistMode")]
    UserlistMode,
}

/// Named method computing an item's icon at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconMethod {
    #[serde(rename = "finesIcon")]
    FinesIcon,
}

/// A single menu entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Route name resolved to a URL by the theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub route_params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Show a status badge next to the entry.
    #[serde(default)]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_method: Option<CheckMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_method: Option<IconMethod>,
    /// Template rendered in place of a plain link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl MenuItem {
    /// A link entry pointing at a named route.
    pub fn link(name: &str, label: &str, route: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            label: Some(label.to_string()),
            route: Some(route.to_string()),
            ..Self::default()
        }
    }

    /// An entry rendered by its own template.
    pub fn from_template(template: &str) -> Self {
        Self {
            template: Some(template.to_string()),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_icon_method(mut self, method: IconMethod) -> Self {
        self.icon_method = Some(method);
        self
    }

    pub fn with_status(mut self) -> Self {
        self.status = true;
        self
    }

    pub fn with_check(mut self, check: CheckMethod) -> Self {
        self.check_method = Some(check);
        self
    }

    pub fn with_route_param(mut self, key: &str, value: &str) -> Self {
        self.route_params.insert(key.to_string(), value.to_string());
        self
    }
}

/// A titled group of menu entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// DOM id of the group header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(
        default,
        rename = "checkMethod",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_method: Option<CheckMethod>,
    #[serde(default, rename = "MenuItems")]
    pub items: Vec<MenuItem>,
}

/// Configuration as written on disk, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMenuConfig {
    /// Full group configuration; replaces the defaults.
    Groups(MenuConfig),
    /// Legacy flat list of Account items.
    Legacy(Vec<MenuItem>),
}

impl RawMenuConfig {
    /// Parse a YAML document. Returns `None` for an empty document.
    pub fn from_yaml_str(yaml: &str) -> Result<Option<Self>, MenuConfigError> {
        if yaml.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_yml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed YAML value.
    pub fn from_value(value: Value) -> Result<Option<Self>, MenuConfigError> {
        let mapping = match value {
            Value::Null => return Ok(None),
            Value::Mapping(mapping) => mapping,
            Value::Bool(_) => return Err(MenuConfigError::NotAMapping { found: "a boolean" }),
            Value::Number(_) => return Err(MenuConfigError::NotAMapping { found: "a number" }),
            Value::String(_) => return Err(MenuConfigError::NotAMapping { found: "a string" }),
            Value::Sequence(_) => return Err(MenuConfigError::NotAMapping { found: "a list" }),
            Value::Tagged(_) => {
                return Err(MenuConfigError::NotAMapping {
                    found: "a tagged value",
                });
            }
        };

        // A legacy list wins over any groups in the same document
        if let Some(value) = mapping.get(LEGACY_ITEMS_KEY) {
            let items: Vec<MenuItem> = serde_yml::from_value(value.clone()).map_err(|e| {
                MenuConfigError::InvalidLegacyItems {
                    details: e.to_string(),
                }
            })?;
            if !items.is_empty() {
                return Ok(Some(Self::Legacy(items)));
            }
            warn!("ignoring empty legacy MenuItems list in account menu config");
        }

        let mut groups = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = key.as_str().ok_or(MenuConfigError::NonStringKey)?.to_string();
            if key == LEGACY_ITEMS_KEY {
                continue;
            }

            let group: MenuGroup =
                serde_yml::from_value(value).map_err(|e| MenuConfigError::InvalidGroup {
                    group: key.clone(),
                    details: e.to_string(),
                })?;
            groups.push((key, group));
        }

        if groups.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::Groups(MenuConfig { groups })))
    }
}

/// Ordered account menu groups, keyed by group key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuConfig {
    groups: Vec<(String, MenuGroup)>,
}

impl MenuConfig {
    /// Build a configuration from ordered `(key, group)` pairs.
    pub fn new(groups: Vec<(String, MenuGroup)>) -> Self {
        Self { groups }
    }

    /// The built-in menu used when nothing is configured.
    pub fn builtin() -> Self {
        defaults::default_menu()
    }

    /// Apply defaults to whatever was configured.
    ///
    /// - nothing configured: the built-in menu
    /// - a legacy flat item list: the built-in menu with its Account items replaced
    /// - groups: used as-is, without merging in the built-in groups
    pub fn resolve(raw: Option<RawMenuConfig>) -> Self {
        match raw {
            None => {
                debug!("no account menu configured, using built-in menu");
                Self::builtin()
            }
            Some(RawMenuConfig::Legacy(items)) => {
                debug!(
                    items = items.len(),
                    "legacy account menu config, replacing Account items"
                );
                let mut menu = Self::builtin();
                if let Some(account) = menu.group_mut(ACCOUNT_GROUP) {
                    account.items = items;
                }
                menu
            }
            Some(RawMenuConfig::Groups(config)) => config,
        }
    }

    /// Parse and resolve a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MenuConfigError> {
        Ok(Self::resolve(RawMenuConfig::from_yaml_str(yaml)?))
    }

    /// Load from an optional file path; `None` yields the built-in menu.
    pub fn load(path: Option<&Path>) -> Result<Self, MenuConfigError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };
        let yaml = std::fs::read_to_string(path).map_err(|source| MenuConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Groups in configuration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &MenuGroup)> {
        self.groups.iter().map(|(key, group)| (key.as_str(), group))
    }

    pub fn group(&self, key: &str) -> Option<&MenuGroup> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, group)| group)
    }

    pub fn group_mut(&mut self, key: &str) -> Option<&mut MenuGroup> {
        self.groups
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, group)| group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
