//! Named route table used to turn menu routes into URLs.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

/// Catalog routes known out of the box, as `(name, pattern)`.
///
/// Patterns use `:param` segments, filled from an item's route params.
const BUILTIN_ROUTES: &[(&str, &str)] = &[
    ("myresearch-home", "/MyResearch/Home"),
    ("myresearch-favorites", "/MyResearch/Favorites"),
    ("myresearch-checkedout", "/MyResearch/CheckedOut"),
    ("checkouts-history", "/Checkouts/History"),
    ("holds-list", "/Holds/List"),
    (
        "myresearch-storageretrievalrequests",
        "/MyResearch/StorageRetrievalRequests",
    ),
    ("myresearch-illrequests", "/MyResearch/ILLRequests"),
    ("myresearch-fines", "/MyResearch/Fines"),
    ("myresearch-profile", "/MyResearch/Profile"),
    ("librarycards-home", "/LibraryCards/Home"),
    ("overdrive-mycontent", "/Overdrive/MyContent"),
    ("search-history", "/Search/History"),
    ("myresearch-logout", "/MyResearch/Logout"),
    ("editList", "/MyResearch/EditList/:id"),
    ("userList", "/MyResearch/MyList/:id"),
];

/// Maps route names to URL patterns.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// The built-in catalog routes.
    pub fn new() -> Self {
        Self {
            routes: BUILTIN_ROUTES
                .iter()
                .map(|(name, pattern)| ((*name).to_string(), (*pattern).to_string()))
                .collect(),
        }
    }

    /// Add or override routes.
    pub fn with_routes(mut self, extra: &BTreeMap<String, String>) -> Self {
        for (name, pattern) in extra {
            debug!(route = %name, %pattern, "registered route");
            self.routes.insert(name.clone(), pattern.clone());
        }
        self
    }

    /// Build the URL for a named route.
    ///
    /// Returns `None` for an unknown route or a `:param` segment without a value.
    pub fn url(&self, name: &str, params: &BTreeMap<String, String>) -> Option<String> {
        let pattern = self.routes.get(name)?;
        fill_pattern(pattern, params)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitute `:param` segments of a pattern.
///
/// Pattern: "/MyResearch/EditList/:id"
/// Params: {"id": "NEW"}
/// Result: Some("/MyResearch/EditList/NEW")
fn fill_pattern(pattern: &str, params: &BTreeMap<String, String>) -> Option<String> {
    let mut segments = Vec::new();

    for segment in pattern.split('/') {
        if let Some(param_name) = segment.strip_prefix(':') {
            let value = params.get(param_name)?;
            segments.push(urlencoding::encode(value).into_owned());
        } else {
            segments.push(segment.to_string());
        }
    }

    Some(segments.join("/"))
}
