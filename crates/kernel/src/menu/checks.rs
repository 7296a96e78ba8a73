//! Capability predicates and icon methods evaluated per request.

use crate::context::{CapabilityParams, MenuContext, OfflineMode, SavedSearchSetting, UserListMode};

use super::config::{CheckMethod, IconMethod};

/// Currency used for the fines icon when the site configures none.
const DEFAULT_CURRENCY: &str = "usd";

impl CheckMethod {
    /// Evaluate the predicate. Anything the collaborators cannot confirm is `false`.
    pub fn evaluate(self, ctx: &MenuContext<'_>) -> bool {
        match self {
            Self::Favorites => ctx.user_list.mode() != UserListMode::Disabled,
            Self::Checkedout => ils_capability(ctx, "getMyTransactions"),
            Self::Historicloans => ils_function(ctx, "getMyTransactionHistory"),
            Self::Holds => ils_capability(ctx, "getMyHolds"),
            Self::StorageRetrievalRequests => ils_function(ctx, "StorageRetrievalRequests"),
            Self::IllRequests => ils_function(ctx, "ILLRequests"),
            Self::Fines => ils_capability(ctx, "getMyFines"),
            Self::LibraryCards => {
                ils_online(ctx) && ctx.auth.user().is_some() && ctx.account.library_cards_enabled()
            }
            Self::Overdrive => ctx.overdrive.show_my_content_link(),
            Self::History => ctx.account.saved_search_setting() == SavedSearchSetting::Enabled,
            Self::Logout => ctx.auth.user().is_some(),
            Self::UserlistMode => {
                ctx.auth.user().is_some() && ctx.user_list.mode() != UserListMode::Disabled
            }
        }
    }

    /// Name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "checkFavorites",
            Self::Checkedout => "checkCheckedout",
            Self::Historicloans => "checkHistoricloans",
            Self::Holds => "checkHolds",
            Self::StorageRetrievalRequests => "checkStorageRetrievalRequests",
            Self::IllRequests => "checkILLRequests",
            Self::Fines => "checkFines",
            Self::LibraryCards => "checkLibraryCards",
            Self::Overdrive => "checkOverdrive",
            Self::History => "checkHistory",
            Self::Logout => "checkLogout",
            Self::UserlistMode => "checkUserlistMode",
        }
    }
}

impl IconMethod {
    /// Compute the icon name.
    pub fn resolve(self, ctx: &MenuContext<'_>) -> String {
        match self {
            Self::FinesIcon => {
                let currency = ctx
                    .site
                    .default_currency()
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
                format!("currency-{}", currency.to_lowercase())
            }
        }
    }
}

/// The ILS counts as online unless it runs in `ils-none` mode.
pub fn ils_online(ctx: &MenuContext<'_>) -> bool {
    ctx.ils.offline_mode() != Some(OfflineMode::IlsNone)
}

/// Parameters for ILS checks: the patron, for logged-in users with an ILS login.
pub fn capability_params(ctx: &MenuContext<'_>) -> CapabilityParams {
    let patron = ctx.auth.user().and_then(|_| ctx.auth.ils_patron());
    CapabilityParams { patron }
}

fn ils_capability(ctx: &MenuContext<'_>, capability: &str) -> bool {
    ils_online(ctx) && ctx.ils.check_capability(capability, &capability_params(ctx))
}

fn ils_function(ctx: &MenuContext<'_>, function: &str) -> bool {
    ils_online(ctx) && ctx.ils.check_function(function, &capability_params(ctx))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::context::{
        AccountCapabilities, AuthHelper, IlsConnection, OverdriveHelper, Patron, SiteConfig, User,
        UserListHelper,
    };

    /// One struct standing in for every collaborator.
    #[derive(Default)]
    struct Fixture {
        user: Option<User>,
        patron: Option<Patron>,
        offline: Option<OfflineMode>,
        capabilities: Vec<&'static str>,
        functions: Vec<&'static str>,
        list_mode: UserListMode,
        overdrive: bool,
        library_cards: bool,
        saved_searches: SavedSearchSetting,
        currency: Option<String>,
        seen_params: Mutex<Vec<CapabilityParams>>,
    }

    impl AuthHelper for Fixture {
        fn user(&self) -> Option<User> {
            self.user.clone()
        }
        fn ils_patron(&self) -> Option<Patron> {
            self.patron.clone()
        }
    }

    impl IlsConnection for Fixture {
        fn offline_mode(&self) -> Option<OfflineMode> {
            self.offline
        }
        fn check_capability(&self, capability: &str, params: &CapabilityParams) -> bool {
            self.seen_params.lock().unwrap().push(params.clone());
            self.capabilities.contains(&capability)
        }
        fn check_function(&self, function: &str, params: &CapabilityParams) -> bool {
            self.seen_params.lock().unwrap().push(params.clone());
            self.functions.contains(&function)
        }
    }

    impl UserListHelper for Fixture {
        fn mode(&self) -> UserListMode {
            self.list_mode
        }
    }

    impl OverdriveHelper for Fixture {
        fn show_my_content_link(&self) -> bool {
            self.overdrive
        }
    }

    impl AccountCapabilities for Fixture {
        fn library_cards_enabled(&self) -> bool {
            self.library_cards
        }
        fn saved_search_setting(&self) -> SavedSearchSetting {
            self.saved_searches
        }
    }

    impl SiteConfig for Fixture {
        fn default_currency(&self) -> Option<String> {
            self.currency.clone()
        }
    }

    fn ctx(f: &Fixture) -> MenuContext<'_> {
        MenuContext {
            auth: f,
            ils: f,
            user_list: f,
            overdrive: f,
            account: f,
            site: f,
        }
    }

    #[test]
    fn ils_capabilities_follow_the_driver() {
        let f = Fixture {
            capabilities: vec!["getMyHolds"],
            functions: vec!["ILLRequests"],
            ..Fixture::default()
        };
        assert!(CheckMethod::Holds.evaluate(&ctx(&f)));
        assert!(!CheckMethod::Checkedout.evaluate(&ctx(&f)));
        assert!(!CheckMethod::Fines.evaluate(&ctx(&f)));
        assert!(CheckMethod::IllRequests.evaluate(&ctx(&f)));
        assert!(!CheckMethod::StorageRetrievalRequests.evaluate(&ctx(&f)));
        assert!(!CheckMethod::Historicloans.evaluate(&ctx(&f)));
    }

    #[test]
    fn ils_none_hides_everything_ils_backed() {
        let f = Fixture {
            user: Some(User::new("jo")),
            offline: Some(OfflineMode::IlsNone),
            capabilities: vec!["getMyHolds", "getMyFines", "getMyTransactions"],
            functions: vec!["ILLRequests", "StorageRetrievalRequests"],
            library_cards: true,
            ..Fixture::default()
        };
        for check in [
            CheckMethod::Holds,
            CheckMethod::Fines,
            CheckMethod::Checkedout,
            CheckMethod::IllRequests,
            CheckMethod::StorageRetrievalRequests,
            CheckMethod::LibraryCards,
        ] {
            assert!(!check.evaluate(&ctx(&f)), "{} should be hidden", check.as_str());
        }
        assert!(f.seen_params.lock().unwrap().is_empty());
    }

    #[test]
    fn temporarily_offline_ils_still_counts_as_online() {
        let f = Fixture {
            offline: Some(OfflineMode::IlsOffline),
            capabilities: vec!["getMyHolds"],
            ..Fixture::default()
        };
        assert!(ils_online(&ctx(&f)));
        assert!(CheckMethod::Holds.evaluate(&ctx(&f)));
    }

    #[test]
    fn patron_passed_only_for_logged_in_user() {
        let anonymous = Fixture {
            patron: Some(Patron::new("card-1")),
            ..Fixture::default()
        };
        assert_eq!(capability_params(&ctx(&anonymous)), CapabilityParams::default());

        let logged_in = Fixture {
            user: Some(User::new("jo")),
            patron: Some(Patron::new("card-1")),
            ..Fixture::default()
        };
        CheckMethod::Holds.evaluate(&ctx(&logged_in));
        let seen = logged_in.seen_params.lock().unwrap();
        assert_eq!(seen[0].patron, Some(Patron::new("card-1")));
    }

    #[test]
    fn library_cards_need_user_and_setting() {
        let mut f = Fixture {
            library_cards: true,
            ..Fixture::default()
        };
        assert!(!CheckMethod::LibraryCards.evaluate(&ctx(&f)));
        f.user = Some(User::new("jo"));
        assert!(CheckMethod::LibraryCards.evaluate(&ctx(&f)));
        f.library_cards = false;
        assert!(!CheckMethod::LibraryCards.evaluate(&ctx(&f)));
    }

    #[test]
    fn user_list_checks() {
        let mut f = Fixture::default();
        assert!(CheckMethod::Favorites.evaluate(&ctx(&f)));
        assert!(!CheckMethod::UserlistMode.evaluate(&ctx(&f)));

        f.user = Some(User::new("jo"));
        f.list_mode = UserListMode::PrivateOnly;
        assert!(CheckMethod::Favorites.evaluate(&ctx(&f)));
        assert!(CheckMethod::UserlistMode.evaluate(&ctx(&f)));

        f.list_mode = UserListMode::Disabled;
        assert!(!CheckMethod::Favorites.evaluate(&ctx(&f)));
        assert!(!CheckMethod::UserlistMode.evaluate(&ctx(&f)));
    }

    #[test]
    fn history_overdrive_and_logout() {
        let mut f = Fixture::default();
        assert!(CheckMethod::History.evaluate(&ctx(&f)));
        assert!(!CheckMethod::Overdrive.evaluate(&ctx(&f)));
        assert!(!CheckMethod::Logout.evaluate(&ctx(&f)));

        f.saved_searches = SavedSearchSetting::Disabled;
        f.overdrive = true;
        f.user = Some(User::new("jo"));
        assert!(!CheckMethod::History.evaluate(&ctx(&f)));
        assert!(CheckMethod::Overdrive.evaluate(&ctx(&f)));
        assert!(CheckMethod::Logout.evaluate(&ctx(&f)));
    }

    #[test]
    fn fines_icon_uses_lowercase_currency() {
        let mut f = Fixture::default();
        assert_eq!(IconMethod::FinesIcon.resolve(&ctx(&f)), "currency-usd");
        f.currency = Some("EUR".to_string());
        assert_eq!(IconMethod::FinesIcon.resolve(&ctx(&f)), "currency-eur");
    }
}
