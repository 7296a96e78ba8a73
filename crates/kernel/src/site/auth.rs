//! Per-request authentication state.

use crate::context::{AuthHelper, Patron, User};

/// [`AuthHelper`] for a single request whose user was established upstream.
#[derive(Debug, Clone, Default)]
pub struct RequestAuth {
    user: Option<User>,
    patron: Option<Patron>,
}

impl RequestAuth {
    /// Build from raw header/flag values, ignoring blanks.
    pub fn from_parts(user: Option<&str>, patron: Option<&str>) -> Self {
        let user = user
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(User::new);
        let patron = patron
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(Patron::new);
        Self { user, patron }
    }
}

impl AuthHelper for RequestAuth {
    fn user(&self) -> Option<User> {
        self.user.clone()
    }

    fn ils_patron(&self) -> Option<Patron> {
        // No ILS login without a catalog login
        self.user.as_ref().and(self.patron.clone())
    }
}
