use once_cell::sync::Lazy;
use regex::Regex;

/// Input validation utilities for the account-auth service

// Compiled once at startup; the pattern is a hardcoded constant.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Validate password length
pub fn validate_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!validate_email("invalid"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("pw123456"));
        assert!(validate_password("a-much-longer-passphrase"));
    }

    #[test]
    fn test_invalid_password() {
        assert!(!validate_password("short")); // Below minimum length
        assert!(!validate_password(""));
    }
}
