//! Built-in account menu.

use super::config::{ACCOUNT_GROUP, CheckMethod, IconMethod, MenuConfig, MenuGroup, MenuItem};

/// Template listing the user's saved lists inside the Lists group.
pub const MY_LISTS_TEMPLATE: &str = "myresearch/menu-mylists.html";

/// The menu shown when no account menu configuration exists.
pub fn default_menu() -> MenuConfig {
    MenuConfig::new(vec![
        (ACCOUNT_GROUP.to_string(), account_group()),
        ("Lists".to_string(), lists_group()),
    ])
}

fn account_group() -> MenuGroup {
    MenuGroup {
        name: Some("acc".to_string()),
        label: Some("Your Account".to_string()),
        id: Some("acc-menu-acc-header".to_string()),
        class: Some("account-menu".to_string()),
        check_method: None,
        items: vec![
            MenuItem::link("favorites", "saved_items", "myresearch-favorites")
                .with_icon("user-favorites")
                .with_check(CheckMethod::Favorites),
            MenuItem::link("checkedout", "Checked Out Items", "myresearch-checkedout")
                .with_icon("user-checked-out")
                .with_status()
                .with_check(CheckMethod::Checkedout),
            MenuItem::link("historicloans", "Loan History", "checkouts-history")
                .with_icon("user-loan-history")
                .with_check(CheckMethod::Historicloans),
            MenuItem::link("holds", "Holds and Recalls", "holds-list")
                .with_icon("user-holds")
                .with_status()
                .with_check(CheckMethod::Holds),
            MenuItem::link(
                "storageRetrievalRequests",
                "Storage Retrieval Requests",
                "myresearch-storageretrievalrequests",
            )
            .with_icon("user-storage-retrievals")
            .with_status()
            .with_check(CheckMethod::StorageRetrievalRequests),
            MenuItem::link(
                "ILLRequests",
                "Interlibrary Loan Requests",
                "myresearch-illrequests",
            )
            .with_icon("user-ill-requests")
            .with_status()
            .with_check(CheckMethod::IllRequests),
            MenuItem::link("fines", "Fines", "myresearch-fines")
                .with_status()
                .with_check(CheckMethod::Fines)
                .with_icon_method(IconMethod::FinesIcon),
            MenuItem::link("profile", "Profile", "myresearch-profile").with_icon("profile"),
            MenuItem::link("librarycards", "Library Cards", "librarycards-home")
                .with_icon("barcode")
                .with_check(CheckMethod::LibraryCards),
            MenuItem::link("dgcontent", "Overdrive Content", "overdrive-mycontent")
                .with_icon("overdrive")
                .with_check(CheckMethod::Overdrive),
            MenuItem::link("history", "Search History", "search-history")
                .with_icon("search")
                .with_check(CheckMethod::History),
            MenuItem::link("logout", "Log Out", "myresearch-logout")
                .with_icon("sign-out")
                .with_check(CheckMethod::Logout),
        ],
    }
}

fn lists_group() -> MenuGroup {
    MenuGroup {
        name: None,
        label: Some("Your Lists".to_string()),
        id: Some("acc-menu-lists-header".to_string()),
        class: None,
        check_method: Some(CheckMethod::UserlistMode),
        items: vec![
            MenuItem::from_template(MY_LISTS_TEMPLATE).with_icon("user-list"),
            MenuItem::link("newlist", "Create a List", "editList")
                .with_route_param("id", "NEW")
                .with_icon("ui-add"),
        ],
    }
}
