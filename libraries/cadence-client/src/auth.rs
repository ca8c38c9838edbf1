//! Authentication for the Cadence API.

use cadence_core::{jwt, validation, User};
use reqwest::Client;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Result};
use crate::http;
use crate::types::{AuthResponse, LoginRequest, Session};

/// Bearer credentials passed explicitly to every authenticated call.
///
/// The client never stores a token; hosts keep the context for as long as
/// their session lasts and drop it on logout or after `Unauthorized`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    /// Wrap a bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Raw bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// User read from the token claims (display only, never verified)
    pub fn user(&self) -> Result<User> {
        Ok(jwt::user_from_token(&self.token)?)
    }

    /// Whether the token's `exp` has passed (undecodable tokens count as expired)
    pub fn is_expired(&self) -> bool {
        jwt::is_token_expired(&self.token)
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Authentication client for the Cadence API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        validation::validate_login(email, password)?;

        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = self.http.post(&url).json(&LoginRequest { email, password });
        let response = http::send(request).await.map_err(|error| {
            warn!(error = %error, "Login failed");
            error
        })?;

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(format!("Failed to parse login response: {}", e)))?;

        let user = jwt::user_from_token(&auth.token)?;

        info!(
            user_id = %user.id,
            role = ?user.role,
            "Login successful"
        );

        Ok(Session {
            token: auth.token,
            user,
        })
    }
}
