#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`FakeCatalog`] stands in for every collaborator the account menu
//! consults, so each test states exactly which features are on.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bibliotheca_kernel::context::{
    AccountCapabilities, AuthHelper, CapabilityParams, IlsConnection, MenuContext, OfflineMode,
    OverdriveHelper, Patron, SavedSearchSetting, SiteConfig, User, UserListHelper, UserListMode,
    UserListSummary,
};
use bibliotheca_kernel::menu::{AccountMenu, MenuConfig};
use bibliotheca_kernel::theme::{RouteTable, ThemeEngine};

/// Every ILS capability the built-in menu asks about.
pub const ALL_CAPABILITIES: &[&str] = &["getMyTransactions", "getMyHolds", "getMyFines"];

/// Every ILS function the built-in menu asks about.
pub const ALL_FUNCTIONS: &[&str] = &[
    "getMyTransactionHistory",
    "StorageRetrievalRequests",
    "ILLRequests",
];

/// Configurable fake for all menu collaborators.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub user: Option<User>,
    pub patron: Option<Patron>,
    pub offline_mode: Option<OfflineMode>,
    pub capabilities: Vec<String>,
    pub functions: Vec<String>,
    pub list_mode: UserListMode,
    pub lists: Vec<UserListSummary>,
    pub overdrive: bool,
    pub library_cards: bool,
    pub saved_searches: SavedSearchSetting,
    pub currency: Option<String>,
    /// Every params value passed to the ILS, in call order.
    pub ils_calls: Mutex<Vec<(String, CapabilityParams)>>,
}

impl FakeCatalog {
    /// Anonymous visitor, ILS online with nothing advertised.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Logged-in user with an ILS patron and a fully featured ILS.
    pub fn full_featured(username: &str) -> Self {
        Self {
            user: Some(User::new(username)),
            patron: Some(Patron::new(format!("{username}-card"))),
            capabilities: ALL_CAPABILITIES.iter().map(|s| s.to_string()).collect(),
            functions: ALL_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
            overdrive: true,
            library_cards: true,
            ..Self::default()
        }
    }

    pub fn with_offline_mode(mut self, mode: OfflineMode) -> Self {
        self.offline_mode = Some(mode);
        self
    }

    pub fn with_list_mode(mut self, mode: UserListMode) -> Self {
        self.list_mode = mode;
        self
    }

    pub fn with_lists(mut self, lists: Vec<UserListSummary>) -> Self {
        self.lists = lists;
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }

    pub fn without_capability(mut self, capability: &str) -> Self {
        self.capabilities.retain(|c| c != capability);
        self
    }

    pub fn ctx(&self) -> MenuContext<'_> {
        MenuContext {
            auth: self,
            ils: self,
            user_list: self,
            overdrive: self,
            account: self,
            site: self,
        }
    }

    pub fn ils_call_count(&self) -> usize {
        self.ils_calls.lock().unwrap().len()
    }
}

impl AuthHelper for FakeCatalog {
    fn user(&self) -> Option<User> {
        self.user.clone()
    }

    fn ils_patron(&self) -> Option<Patron> {
        self.patron.clone()
    }
}

impl IlsConnection for FakeCatalog {
    fn offline_mode(&self) -> Option<OfflineMode> {
        self.offline_mode
    }

    fn check_capability(&self, capability: &str, params: &CapabilityParams) -> bool {
        self.ils_calls
            .lock()
            .unwrap()
            .push((capability.to_string(), params.clone()));
        self.capabilities.iter().any(|c| c == capability)
    }

    fn check_function(&self, function: &str, params: &CapabilityParams) -> bool {
        self.ils_calls
            .lock()
            .unwrap()
            .push((function.to_string(), params.clone()));
        self.functions.iter().any(|f| f == function)
    }
}

impl UserListHelper for FakeCatalog {
    fn mode(&self) -> UserListMode {
        self.list_mode
    }

    fn lists(&self, _user: &User) -> Vec<UserListSummary> {
        self.lists.clone()
    }
}

impl OverdriveHelper for FakeCatalog {
    fn show_my_content_link(&self) -> bool {
        self.overdrive
    }
}

impl AccountCapabilities for FakeCatalog {
    fn library_cards_enabled(&self) -> bool {
        self.library_cards
    }

    fn saved_search_setting(&self) -> SavedSearchSetting {
        self.saved_searches
    }
}

impl SiteConfig for FakeCatalog {
    fn default_currency(&self) -> Option<String> {
        self.currency.clone()
    }
}

/// Account menu over the built-in templates.
pub fn account_menu(config: MenuConfig) -> AccountMenu {
    let theme = ThemeEngine::builtin(RouteTable::new()).unwrap();
    AccountMenu::new(config, Arc::new(theme))
}

/// Account menu using the built-in menu and templates.
pub fn default_account_menu() -> AccountMenu {
    account_menu(MenuConfig::builtin())
}

pub fn list(id: &str, title: &str, count: u32) -> UserListSummary {
    UserListSummary {
        id: id.to_string(),
        title: title.to_string(),
        count,
    }
}
