//! Theme engine and template rendering.
//!
//! Provides Tera-based template rendering with template suggestion
//! resolution and named-route URL generation.

mod engine;
mod urls;

pub use engine::{SharedThemeEngine, ThemeEngine};
pub use urls::RouteTable;
