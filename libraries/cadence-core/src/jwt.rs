//! Token claim decoding for display
//!
//! The signed-in user's id, email and role are read from the bearer token
//! so the UI can show them without a round trip. Signatures are NOT
//! verified here; the API remains the only authority on whether a token is
//! valid.

use crate::error::{CoreError, Result};
use crate::types::{Role, User, UserId};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use chrono::Utc;
use std::time::Duration;

/// Claims carried in the token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,

    /// Login email
    #[serde(default)]
    pub email: String,

    /// Account role
    #[serde(default)]
    pub role: Role,

    /// Expiry as Unix seconds
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// User view of these claims
    pub fn user(&self) -> User {
        User {
            id: UserId::new(self.sub.clone()),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Whether the token is expired at `now` (Unix seconds)
    ///
    /// Tokens without an `exp` claim never expire from the client's view.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| now >= exp)
    }

    /// Time left until expiry at `now`, zero once expired
    pub fn expires_in_at(&self, now: i64) -> Duration {
        match self.exp {
            Some(exp) if exp > now => Duration::from_secs((exp - now) as u64),
            Some(_) => Duration::ZERO,
            None => Duration::MAX,
        }
    }
}

/// Decode the payload segment of `header.payload.signature`
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err(CoreError::invalid_token("expected three dot-separated segments")),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| CoreError::invalid_token(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| CoreError::invalid_token(format!("payload is not valid claims JSON: {}", e)))
}

/// Decode a token straight to the user it describes
pub fn user_from_token(token: &str) -> Result<User> {
    decode_claims(token).map(|claims| claims.user())
}

/// Whether `token` should be treated as expired right now
///
/// Undecodable tokens count as expired.
pub fn is_token_expired(token: &str) -> bool {
    decode_claims(token)
        .map(|claims| claims.is_expired_at(unix_now()))
        .unwrap_or(true)
}

/// Time left on `token`, zero when expired or undecodable
pub fn token_expires_in(token: &str) -> Duration {
    decode_claims(token)
        .map(|claims| claims.expires_in_at(unix_now()))
        .unwrap_or(Duration::ZERO)
}

fn unix_now() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_user_from_claims() {
        let token = token_with(
            r#"{"sub":"7c9e6679-7425-40de-944b-e07fc1f90ae7","email":"ana@example.com","role":"ADMIN","exp":4102444800}"#,
        );

        let user = user_from_token(&token).unwrap();
        assert_eq!(user.id.as_str(), "7c9e6679-7425-40de-944b-e07fc1f90ae7");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.role, Role::Admin);
        assert!(!is_token_expired(&token));
    }

    #[test]
    fn accepts_padded_payload() {
        let padded = base64::engine::general_purpose::URL_SAFE
            .encode(r#"{"sub":"u1","email":"a@b.co","role":"USER"}"#);
        let token = format!("h.{}.s", padded);

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn expiry_math() {
        let claims = TokenClaims {
            sub: "u1".to_string(),
            email: String::new(),
            role: Role::User,
            exp: Some(1_000),
        };

        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1_000));
        assert_eq!(claims.expires_in_at(940), Duration::from_secs(60));
        assert_eq!(claims.expires_in_at(2_000), Duration::ZERO);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(decode_claims("not-a-token").is_err());
        assert!(decode_claims("a..c").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
        assert!(decode_claims(&token_with("not json")).is_err());

        assert!(is_token_expired("garbage"));
        assert_eq!(token_expires_in("garbage"), Duration::ZERO);
    }

    #[test]
    fn expiry_is_measured_against_the_wall_clock() {
        let now = Utc::now().timestamp();
        let claims = |exp: i64| {
            format!(r#"{{"sub":"u1","email":"a@b.co","role":"USER","exp":{}}}"#, exp)
        };
        let live = token_with(&claims(now + 3_600));
        let stale = token_with(&claims(now - 60));

        assert!(!is_token_expired(&live));
        assert!(token_expires_in(&live) > Duration::from_secs(3_500));
        assert!(is_token_expired(&stale));
        assert_eq!(token_expires_in(&stale), Duration::ZERO);
    }
}
