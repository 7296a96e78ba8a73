//! Account menu endpoints.
//!
//! The catalog sits behind an authenticating proxy that forwards the
//! logged-in user and ILS patron as headers.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use crate::context::AuthHelper;
use crate::error::{AppError, AppResult};
use crate::menu::AvailableMenu;
use crate::site::RequestAuth;
use crate::state::AppState;

/// Header carrying the catalog username.
pub const USER_HEADER: &str = "x-catalog-user";

/// Header carrying the ILS patron login.
pub const PATRON_HEADER: &str = "x-catalog-patron";

/// Longest accepted `active` or `id_prefix` value.
pub const MAX_QUERY_VALUE_LEN: usize = 64;

/// Query parameters for the menu fragment.
#[derive(Debug, Default, Deserialize)]
struct MenuQuery {
    /// Name of the item for the current page.
    #[serde(default)]
    active: String,
    /// Prefix for element ids, when the menu appears more than once per page.
    #[serde(default)]
    id_prefix: String,
}

impl MenuQuery {
    fn validate(&self) -> AppResult<()> {
        for (field, value) in [("active", &self.active), ("id_prefix", &self.id_prefix)] {
            if value.len() > MAX_QUERY_VALUE_LEN {
                return Err(AppError::BadRequest(format!(
                    "{field} longer than {MAX_QUERY_VALUE_LEN} bytes"
                )));
            }
        }
        Ok(())
    }
}

fn request_auth(headers: &HeaderMap) -> RequestAuth {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    RequestAuth::from_parts(header(USER_HEADER), header(PATRON_HEADER))
}

/// Render the menu fragment.
async fn menu_html(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
    headers: HeaderMap,
) -> AppResult<Html<String>> {
    query.validate()?;
    let auth = request_auth(&headers);
    let ctx = state.site().context(&auth);
    debug!(active = %query.active, logged_in = auth.user().is_some(), "rendering account menu");

    let html = state
        .account_menu()
        .render(&ctx, &query.active, &query.id_prefix)?;
    Ok(Html(html))
}

/// Filtered menu as JSON.
async fn menu_json(State(state): State<AppState>, headers: HeaderMap) -> Json<AvailableMenu> {
    let auth = request_auth(&headers);
    let ctx = state.site().context(&auth);
    Json(state.account_menu().menu(&ctx))
}

/// Create the account menu router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/myresearch/menu", get(menu_html))
        .route("/myresearch/menu.json", get(menu_json))
}
