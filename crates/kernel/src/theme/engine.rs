//! Theme engine with Tera templates and suggestion resolution.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use tera::{Tera, Value};
use tracing::debug;

use super::urls::RouteTable;

/// Templates compiled into the binary. Files in the template directory with
/// the same name take precedence.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "myresearch/menu.html",
        include_str!("../../templates/myresearch/menu.html"),
    ),
    (
        "myresearch/menu-mylists.html",
        include_str!("../../templates/myresearch/menu-mylists.html"),
    ),
];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Cache mapping suggestion lists to resolved template names.
    suggestion_cache: DashMap<String, String>,
    /// Route names available to the `route_url` filter.
    routes: Arc<RouteTable>,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path, routes: RouteTable) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        tera.extend(&Self::builtin_tera()?)
            .context("failed to add built-in templates")?;

        let routes = Arc::new(routes);
        Self::register_filters(&mut tera, &routes);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), dir = %template_dir.display(), "loaded templates");

        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
            routes,
        })
    }

    /// Create a theme engine with only the built-in templates.
    pub fn builtin(routes: RouteTable) -> Result<Self> {
        let mut tera = Self::builtin_tera()?;
        let routes = Arc::new(routes);
        Self::register_filters(&mut tera, &routes);
        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
            routes,
        })
    }

    /// Create a theme engine with no templates (for testing).
    pub fn empty() -> Result<Self> {
        let mut tera = Tera::default();
        let routes = Arc::new(RouteTable::new());
        Self::register_filters(&mut tera, &routes);
        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
            routes,
        })
    }

    fn builtin_tera() -> Result<Tera> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())
            .context("failed to parse built-in templates")?;
        Ok(tera)
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera, routes: &Arc<RouteTable>) {
        // Route name (+ optional `params` object) to URL
        let table = Arc::clone(routes);
        tera.register_filter(
            "route_url",
            move |value: &Value, args: &HashMap<String, Value>| {
                let name = tera::try_get_value!("route_url", "value", String, value);
                let params: BTreeMap<String, String> = match args.get("params") {
                    Some(Value::Object(map)) => map
                        .iter()
                        .map(|(k, v)| {
                            let v = match v {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            };
                            (k.clone(), v)
                        })
                        .collect(),
                    _ => BTreeMap::new(),
                };

                table
                    .url(&name, &params)
                    .map(Value::String)
                    .ok_or_else(|| tera::Error::msg(format!("cannot build URL for route '{name}'")))
            },
        );

        // DOM id for a menu entry, honouring the caller's id prefix
        tera.register_filter(
            "menu_item_id",
            |value: &Value, args: &HashMap<String, Value>| {
                let name = tera::try_get_value!("menu_item_id", "value", String, value);
                let prefix = args.get("prefix").and_then(|v| v.as_str()).unwrap_or("");
                let slug: String = name
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                    .collect();
                Ok(Value::String(format!("{prefix}{slug}")))
            },
        );
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Route table backing the `route_url` filter.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Add a template from a string (tests and site overrides).
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, content)
            .with_context(|| format!("failed to parse template: {name}"))?;
        self.clear_cache();
        Ok(())
    }

    /// Whether a template with this exact name is loaded. Not cached.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    /// Results are cached per suggestion list, so callers must not build
    /// suggestions from request input.
    ///
    /// Example suggestions: `["myresearch/menu--holds", "myresearch/menu"]`
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        if suggestions.is_empty() {
            return None;
        }

        let cache_key = suggestions.join("|");

        if let Some(cached) = self.suggestion_cache.get(&cache_key) {
            return Some(cached.clone());
        }

        for suggestion in suggestions {
            let template_name = format!("{suggestion}.html");
            if self.tera.get_template(&template_name).is_ok() {
                self.suggestion_cache
                    .insert(cache_key, template_name.clone());
                return Some(template_name);
            }

            // Also try without .html extension (in case suggestion already has it)
            if self.tera.get_template(suggestion).is_ok() {
                let name = (*suggestion).to_string();
                self.suggestion_cache.insert(cache_key, name.clone());
                return Some(name);
            }
        }

        // Negative results are not cached
        None
    }

    /// Render a template with a prepared context.
    pub fn render_in_context(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("failed to render template: {template}"))
    }

    /// Clear the suggestion cache.
    pub fn clear_cache(&self) {
        self.suggestion_cache.clear();
    }

    /// Number of cached suggestion lists.
    pub fn cache_size(&self) -> usize {
        self.suggestion_cache.len()
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .field("cache_size", &self.cache_size())
            .finish()
    }
}

/// Wrap ThemeEngine in Arc for sharing across handlers.
pub type SharedThemeEngine = Arc<ThemeEngine>;
