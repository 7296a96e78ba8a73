//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Path to the template directory (default: ./templates).
    pub template_dir: PathBuf,

    /// Account menu YAML. When unset, the built-in menu is used.
    pub account_menu_config: Option<PathBuf>,

    /// Site YAML describing ILS and feature settings. When unset, defaults apply.
    pub site_config: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let template_dir = env::var("TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let account_menu_config = optional_path("ACCOUNT_MENU_CONFIG");
        let site_config = optional_path("SITE_CONFIG");

        Ok(Self {
            port,
            template_dir,
            account_menu_config,
            site_config,
        })
    }
}

fn optional_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
