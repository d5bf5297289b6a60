//! Credential validation rules
//!
//! Shared by the client forms (checked before any request is sent) and the
//! backend handlers (checked again on arrival).

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check an email address against `^[^@\s]+@[^@\s]+\.[^@\s]+$`
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let clean = |part: &str| !part.is_empty() && !part.contains('@') && !part.chars().any(char::is_whitespace);
    if !clean(local) || !clean(domain) {
        return false;
    }

    // Some dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Check password strength
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
