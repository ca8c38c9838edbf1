//! Request and response types for the Cadence API.

use cadence_core::User;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::AuthContext;

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response body (`tokenType` is always `Bearer` and not needed).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
}

/// Result of a successful login.
///
/// `user` is read from the token claims for display only.
#[derive(Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// Credentials for authenticated calls
    pub fn auth(&self) -> AuthContext {
        AuthContext::new(self.token.clone())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Song attribute a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Artist,
    Title,
    Genre,
}

impl SearchField {
    /// Path segment and query parameter name
    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Artist => "artist",
            SearchField::Title => "title",
            SearchField::Genre => "genre",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
