//! Credential validation applied before calling the identity provider.

use supplink_core::{AppError, AppResult};

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum password length accepted at sign-up.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validated, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Requires exactly one `@`, a non-empty local part, and a dotted domain.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let normalized = value.into().trim().to_lowercase();

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(
                "enter a valid email address".to_owned(),
            ));
        };

        if local.is_empty() || domain.contains('@') {
            return Err(AppError::Validation(
                "enter a valid email address".to_owned(),
            ));
        }

        let domain_is_dotted = domain
            .split('.')
            .all(|label| !label.is_empty())
            && domain.contains('.');
        if !domain_is_dotted {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Checks sign-up password length bounds.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let email = EmailAddress::new("  Buyer@Plant.Example.COM ");
        assert_eq!(
            email.map(|value| value.as_str().to_owned()).ok().as_deref(),
            Some("buyer@plant.example.com")
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for value in ["", "no-at-sign", "@plant.com", "a@b@c.com", "a@nodot", "a@plant."] {
            assert!(EmailAddress::new(value).is_err(), "{value} should fail");
        }
    }

    #[test]
    fn password_bounds_are_enforced() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
        assert!(validate_password(&"x".repeat(PASSWORD_MAX_LENGTH + 1)).is_err());
    }
}
