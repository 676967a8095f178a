// ✅ Field Validation - shared by every entity constructor
//
// Every rule fails fast with a human-readable message. Constructors call these
// before touching any state, so a failed construction has no partial effects.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password must be at least 8 characters long and contain a number.")]
    WeakPassword,

    #[error("Password must be at least 8 characters long and include a number and a special character.")]
    WeakStrictPassword,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("License number must be alphanumeric and 8-12 characters long.")]
    InvalidLicense,

    #[error("{0} must be positive.")]
    NotPositive(&'static str),

    #[error("{0} cannot be negative.")]
    Negative(&'static str),

    #[error("{0} cannot be empty.")]
    Empty(&'static str),
}

// ============================================================================
// PASSWORD POLICY
// ============================================================================

/// Characters counted as "special" by the strict policy.
const SPECIAL_CHARS: &str = "!@#$%^&*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// At least 8 characters and at least one digit (betting desk).
    Basic,

    /// Basic plus at least one of `!@#$%^&*` (shopping desk).
    Strict,
}

impl PasswordPolicy {
    pub fn check(&self, password: &str) -> Result<(), ValidationError> {
        let long_enough = password.chars().count() >= 8;
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        match self {
            PasswordPolicy::Basic => {
                if long_enough && has_digit {
                    Ok(())
                } else {
                    Err(ValidationError::WeakPassword)
                }
            }
            PasswordPolicy::Strict => {
                let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
                if long_enough && has_digit && has_special {
                    Ok(())
                } else {
                    Err(ValidationError::WeakStrictPassword)
                }
            }
        }
    }
}

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

fn license_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[A-Za-z0-9]{8,12}$").unwrap())
}

/// License numbers are 8-12 alphanumeric characters, nothing else.
pub fn check_license(license: &str) -> Result<(), ValidationError> {
    if license_pattern().is_match(license) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLicense)
    }
}

/// Minimal email sanity check, matching the registration rule of the
/// shopping desk: the address must contain an `@`.
pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Strictly positive, finite amount (deposits, prices, fines, bets).
pub fn positive_amount(label: &'static str, amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(label))
    }
}

/// Zero-or-positive, finite amount (opening balances).
pub fn non_negative_amount(label: &'static str, amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative(label))
    }
}

/// Rejects empty or whitespace-only strings (names, addresses).
pub fn non_empty(label: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty(label))
    } else {
        Ok(())
    }
}

/// Numeric identifiers are read as unsigned integers; zero is still invalid.
pub fn positive_id(label: &'static str, id: u32) -> Result<(), ValidationError> {
    if id > 0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(label))
    }
}

// ============================================================================
// TESTS
// ============================================================================
