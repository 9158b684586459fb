//! Password strength rules for tenant accounts.

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const TOO_SHORT: &str = "Password must be at least 8 characters";
pub const MISSING_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const MISSING_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const MISSING_DIGIT: &str = "Password must contain at least one number";
pub const MISSING_SPECIAL: &str = "Password must contain at least one special character";

/// Every rule the password breaks, in a fixed order. Empty means acceptable.
pub fn password_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(TOO_SHORT);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(MISSING_UPPERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(MISSING_LOWERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(MISSING_DIGIT);
    }
    // Anything outside [A-Za-z0-9] counts, including spaces and non-ASCII.
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        violations.push(MISSING_SPECIAL);
    }

    violations
}
