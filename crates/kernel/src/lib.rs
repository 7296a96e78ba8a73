//! Bibliotheca Catalog Kernel Library
//!
//! Account menu assembly for the catalog's account area, the theme engine
//! that renders it, and the HTTP surface serving it. The `bibliotheca`
//! binary is the main entry point.

pub mod config;
pub mod context;
pub mod error;
pub mod menu;
pub mod routes;
pub mod site;
pub mod state;
pub mod theme;

pub use config::Config;
pub use state::AppState;
