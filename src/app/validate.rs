use anyhow::{bail, Result};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

// Local format (07...) or international (+2567...)
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+\d{9,14}|0\d{8,9})$").expect("phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

/// Password policy mirrored from the login form: at least 8 characters with
/// an uppercase letter, a lowercase letter and a digit.
pub fn check_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < 8 {
        bail!("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        bail!("Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        bail!("Password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        bail!("Password must contain a digit");
    }
    Ok(())
}

/// Required-field check shared by the registration forms.
pub fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("Missing required field: {field}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_formats() {
        assert!(is_valid_email("bursar@school.ac.ug"));
        assert!(is_valid_email("j.okello+reg@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_formats() {
        assert!(is_valid_phone("+256772123456"));
        assert!(is_valid_phone("0772123456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("phone"));
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength("Passw0rd").is_ok());
        assert!(check_password_strength("short1A").is_err());
        assert!(check_password_strength("alllower1").is_err());
        assert!(check_password_strength("ALLUPPER1").is_err());
        assert!(check_password_strength("NoDigitsHere").is_err());
    }

    #[test]
    fn test_require() {
        assert!(require("first_name", "Amina").is_ok());
        assert!(require("first_name", "  ").is_err());
    }
}
