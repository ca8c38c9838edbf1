//! Input validation applied before calling the API
//!
//! Limits mirror what the login, signup, playlist and search forms enforce.

use crate::error::{CoreError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Maximum playlist name length (characters)
pub const MAX_PLAYLIST_NAME_LENGTH: usize = 100;

/// Maximum search query length (characters)
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"))
}

/// Check email shape (`local@domain.tld`, no whitespace)
pub fn validate_email(email: &str) -> Result<()> {
    if email_pattern().is_match(email.trim()) {
        Ok(())
    } else {
        Err(CoreError::invalid_input("Please enter a valid email address"))
    }
}

/// Check password length
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(CoreError::invalid_input(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        )));
    }
    Ok(())
}

/// Check a login form
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(CoreError::invalid_input("Password is required"));
    }
    Ok(())
}

/// Check a signup form
pub fn validate_signup(email: &str, password: &str, confirm_password: &str) -> Result<()> {
    validate_email(email)?;
    validate_password(password)?;
    if password != confirm_password {
        return Err(CoreError::invalid_input("Passwords do not match"));
    }
    Ok(())
}

/// Check a playlist name and return it trimmed
pub fn validate_playlist_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_input("Playlist name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_PLAYLIST_NAME_LENGTH {
        return Err(CoreError::invalid_input(format!(
            "Playlist name must be at most {} characters",
            MAX_PLAYLIST_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Check a search query and return it trimmed
pub fn validate_search_query(query: &str) -> Result<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_input("Search query cannot be empty"));
    }
    if trimmed.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(CoreError::invalid_input(format!(
            "Search query must be at most {} characters",
            MAX_SEARCH_QUERY_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("  ana@example.co.uk ").is_ok());
        assert!(validate_email("ana@example").is_err());
        assert!(validate_email("ana example@x.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn signup_requires_matching_passwords() {
        assert!(validate_signup("ana@example.com", "secret1", "secret1").is_ok());
        assert!(validate_signup("ana@example.com", "secret1", "secret2").is_err());
        assert!(validate_signup("ana@example.com", "short", "short").is_err());
    }

    #[test]
    fn login_requires_password() {
        assert!(validate_login("ana@example.com", "x").is_ok());
        assert!(validate_login("ana@example.com", "").is_err());
    }

    #[test]
    fn playlist_names_are_trimmed_and_bounded() {
        assert_eq!(validate_playlist_name("  Focus  ").unwrap(), "Focus");
        assert!(validate_playlist_name("   ").is_err());
        assert!(validate_playlist_name(&"x".repeat(100)).is_ok());
        assert!(validate_playlist_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn search_queries_are_bounded() {
        assert_eq!(validate_search_query(" miles ").unwrap(), "miles");
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
