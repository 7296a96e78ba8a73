//! Account menu assembly: filter configured groups and items against the
//! current request, then render the result through the theme.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::context::MenuContext;
use crate::theme::SharedThemeEngine;

use super::config::{ACCOUNT_GROUP, CheckMethod, MenuConfig, MenuGroup, MenuItem};

/// Base name of the menu template.
pub const MENU_TEMPLATE: &str = "myresearch/menu";

/// Errors raised while rendering the account menu.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("account menu template not found: {0}")]
    TemplateNotFound(String),

    #[error("failed to render account menu")]
    Render(#[from] anyhow::Error),
}

/// A menu entry that passed its check, with its icon resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableItem {
    pub name: Option<String>,
    pub label: Option<String>,
    pub route: Option<String>,
    pub route_params: BTreeMap<String, String>,
    pub icon: Option<String>,
    pub status: bool,
    pub template: Option<String>,
    /// Output of `template`, filled in by [`AccountMenu::render`].
    pub rendered: Option<String>,
}

impl AvailableItem {
    fn resolve(item: &MenuItem, ctx: &MenuContext<'_>) -> Self {
        let icon = match item.icon_method {
            Some(method) => Some(method.resolve(ctx)),
            None => item.icon.clone(),
        };
        Self {
            name: item.name.clone(),
            label: item.label.clone(),
            route: item.route.clone(),
            route_params: item.route_params.clone(),
            icon,
            status: item.status,
            template: item.template.clone(),
            rendered: None,
        }
    }
}

/// A group with at least one available entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableGroup {
    /// Configuration key, e.g. "Account".
    pub key: String,
    pub name: Option<String>,
    pub label: Option<String>,
    pub id: Option<String>,
    pub class: Option<String>,
    pub items: Vec<AvailableItem>,
}

/// The menu as shown to the current user.
///
/// Every group holds at least one item; order follows the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailableMenu {
    pub groups: Vec<AvailableGroup>,
}

impl AvailableMenu {
    pub fn get(&self, key: &str) -> Option<&AvailableGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Items of the Account group; empty when that group is hidden or absent.
    pub fn account_items(&self) -> &[AvailableItem] {
        self.get(ACCOUNT_GROUP)
            .map(|g| g.items.as_slice())
            .unwrap_or_default()
    }

    /// Names of all available items, group by group.
    pub fn item_names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .filter_map(|i| i.name.as_deref())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn is_available(check: Option<CheckMethod>, ctx: &MenuContext<'_>) -> bool {
    check.is_none_or(|check| check.evaluate(ctx))
}

/// The account menu helper.
#[derive(Debug, Clone)]
pub struct AccountMenu {
    config: MenuConfig,
    theme: SharedThemeEngine,
}

impl AccountMenu {
    pub fn new(config: MenuConfig, theme: SharedThemeEngine) -> Self {
        Self { config, theme }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn theme(&self) -> &SharedThemeEngine {
        &self.theme
    }

    /// All groups with items to display for this request.
    pub fn menu(&self, ctx: &MenuContext<'_>) -> AvailableMenu {
        let groups = self
            .config
            .groups()
            .filter_map(|(key, group)| available_group(key, group, ctx))
            .collect();
        AvailableMenu { groups }
    }

    /// Render the menu, marking `active_item` and prefixing element ids with `id_prefix`.
    pub fn render(
        &self,
        ctx: &MenuContext<'_>,
        active_item: &str,
        id_prefix: &str,
    ) -> Result<String, MenuError> {
        let mut menu = self.menu(ctx);
        self.render_item_templates(&mut menu, ctx, active_item, id_prefix)?;

        // The active name comes from the request; look it up without caching
        let specific = format!("{MENU_TEMPLATE}--{active_item}.html");
        let template = if !active_item.is_empty() && self.theme.has_template(&specific) {
            specific
        } else {
            self.theme
                .resolve_template(&[MENU_TEMPLATE])
                .ok_or_else(|| MenuError::TemplateNotFound(format!("{MENU_TEMPLATE}.html")))?
        };

        let mut context = tera::Context::new();
        context.insert("menu", &menu);
        context.insert("active", active_item);
        context.insert("idPrefix", id_prefix);
        // Flat Account list for templates predating groups
        context.insert("items", menu.account_items());

        Ok(self.theme.render_in_context(&template, &context)?)
    }

    /// Render entries that carry their own template.
    fn render_item_templates(
        &self,
        menu: &mut AvailableMenu,
        ctx: &MenuContext<'_>,
        active_item: &str,
        id_prefix: &str,
    ) -> Result<(), MenuError> {
        let mut lists = None;

        for item in menu.groups.iter_mut().flat_map(|g| g.items.iter_mut()) {
            let Some(template) = item.template.clone() else {
                continue;
            };

            let lists = lists.get_or_insert_with(|| {
                ctx.auth
                    .user()
                    .map(|user| ctx.user_list.lists(&user))
                    .unwrap_or_default()
            });

            let mut context = tera::Context::new();
            context.insert("item", &*item);
            context.insert("active", active_item);
            context.insert("idPrefix", id_prefix);
            context.insert("lists", &*lists);

            item.rendered = Some(self.theme.render_in_context(&template, &context)?);
        }

        Ok(())
    }
}

fn available_group(key: &str, group: &MenuGroup, ctx: &MenuContext<'_>) -> Option<AvailableGroup> {
    if !is_available(group.check_method, ctx) {
        debug!(
            group = %key,
            check = group.check_method.map(CheckMethod::as_str).unwrap_or_default(),
            "account menu group hidden"
        );
        return None;
    }

    let items: Vec<AvailableItem> = group
        .items
        .iter()
        .filter(|item| {
            let keep = is_available(item.check_method, ctx);
            if !keep {
                debug!(
                    group = %key,
                    item = item.name.as_deref().unwrap_or_default(),
                    "account menu item hidden"
                );
            }
            keep
        })
        .map(|item| AvailableItem::resolve(item, ctx))
        .collect();

    if items.is_empty() {
        debug!(group = %key, "account menu group has no available items");
        return None;
    }

    Some(AvailableGroup {
        key: key.to_string(),
        name: group.name.clone(),
        label: group.label.clone(),
        id: group.id.clone(),
        class: group.class.clone(),
        items,
    })
}
