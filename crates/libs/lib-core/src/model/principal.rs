use serde::{Deserialize, Serialize};

/// A registered account in Firebase Authentication.
///
/// Read-only view fetched per run; the tools never modify a principal, they
/// only delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            email: email.map(str::to_string),
            display_name: None,
        }
    }

    /// Email for log lines, with a placeholder for accounts without one
    /// (phone or anonymous sign-in).
    pub fn email_or_placeholder(&self) -> &str {
        self.email.as_deref().unwrap_or("<no email>")
    }
}

/// One page of a user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrincipalPage {
    pub principals: Vec<Principal>,
    /// Set when the provider has more users than this page holds.
    pub next_page_token: Option<String>,
}

impl PrincipalPage {
    pub fn is_truncated(&self) -> bool {
        self.next_page_token.is_some()
    }
}
