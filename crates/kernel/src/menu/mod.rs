//! Account menu for the user's account area.
//!
//! The menu is a configuration-driven tree of groups and items:
//! - Groups and items may name a check method gating their visibility
//! - Checks consult the ILS, the current user, and site feature switches
//! - Groups left without items are dropped before rendering

mod builder;
mod checks;
mod config;
mod defaults;

pub use builder::{
    AccountMenu, AvailableGroup, AvailableItem, AvailableMenu, MENU_TEMPLATE, MenuError,
};
pub use checks::{capability_params, ils_online};
pub use config::{
    ACCOUNT_GROUP, CheckMethod, IconMethod, MenuConfig, MenuConfigError, MenuGroup, MenuItem,
    RawMenuConfig,
};
pub use defaults::{MY_LISTS_TEMPLATE, default_menu};
