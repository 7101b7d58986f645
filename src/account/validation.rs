//! Rules checked on the registration form before anything touches the store.

use anyhow::{anyhow, Result};

use super::types::NewAccount;

pub const DEFAULT_PASSWORD_MIN: usize = 8;
pub const DEFAULT_PASSWORD_MAX: usize = 16;

pub const USER_ID_REQUIRED: &str = "User ID is required";
pub const NAME_REQUIRED: &str = "Name is required";

/// Validates candidate accounts.
///
/// Built once at startup and handed to the account service; password bounds are
/// inclusive and counted in characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    password_min: usize,
    password_max: usize,
}

impl Validator {
    /// # Errors
    /// Return error if the bounds are empty or inverted
    pub fn new(password_min: usize, password_max: usize) -> Result<Self> {
        if password_min == 0 {
            return Err(anyhow!("minimum password length must be at least 1"));
        }
        if password_min > password_max {
            return Err(anyhow!(
                "minimum password length {password_min} exceeds maximum {password_max}"
            ));
        }
        Ok(Self {
            password_min,
            password_max,
        })
    }

    #[must_use]
    pub const fn password_min(&self) -> usize {
        self.password_min
    }

    #[must_use]
    pub const fn password_max(&self) -> usize {
        self.password_max
    }

    /// Returns one message per failed rule, in rule order. Empty means valid.
    #[must_use]
    pub fn validate(&self, account: &NewAccount) -> Vec<String> {
        let mut errors = Vec::new();

        if account.user_id.is_empty() {
            errors.push(USER_ID_REQUIRED.to_string());
        }

        if account.name.is_empty() {
            errors.push(NAME_REQUIRED.to_string());
        }

        let length = account.password.chars().count();
        if length < self.password_min || length > self.password_max {
            errors.push(self.password_length_message());
        }

        errors
    }

    fn password_length_message(&self) -> String {
        format!(
            "Password must be between {} and {} characters",
            self.password_min, self.password_max
        )
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            password_min: DEFAULT_PASSWORD_MIN,
            password_max: DEFAULT_PASSWORD_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_account_has_no_errors() {
        let validator = Validator::default();
        let account = NewAccount::new("valid_user", "valid_user_name", "12345678");
        assert!(validator.validate(&account).is_empty());
    }

    #[test]
    fn password_bounds_are_inclusive() {
        let validator = Validator::default();
        for password in ["12345678", "1234567890123456"] {
            let account = NewAccount::new("user", "name", password);
            assert!(validator.validate(&account).is_empty(), "{password}");
        }
        for password in ["1234567", "12345678901234567", ""] {
            let account = NewAccount::new("user", "name", password);
            assert_eq!(validator.validate(&account).len(), 1, "{password}");
        }
    }

    #[test]
    fn password_length_counts_characters() {
        let validator = Validator::default();
        // 8 characters, 24 bytes
        let account = NewAccount::new("user", "name", "パスワードです。");
        assert!(validator.validate(&account).is_empty());
        // 17 characters
        let account = NewAccount::new("user", "name", "パスワードパスワードパスワードパス");
        assert_eq!(validator.validate(&account).len(), 1);
    }

    #[test]
    fn errors_follow_rule_order() {
        let validator = Validator::default();
        let account = NewAccount::new("", "", "1234");
        let errors = validator.validate(&account);
        assert_eq!(
            errors,
            vec![
                USER_ID_REQUIRED.to_string(),
                NAME_REQUIRED.to_string(),
                "Password must be between 8 and 16 characters".to_string(),
            ]
        );
    }

    #[test]
    fn missing_user_id_only() {
        let validator = Validator::default();
        let account = NewAccount::new("", "incorrect_user_for_nill", "12345678");
        assert_eq!(validator.validate(&account), vec![USER_ID_REQUIRED.to_string()]);
    }

    #[test]
    fn new_rejects_invalid_bounds() {
        assert!(Validator::new(0, 16).is_err());
        assert!(Validator::new(10, 9).is_err());
        let validator = Validator::new(4, 4).ok();
        assert_eq!(validator.map(|v| v.password_max()), Some(4));
    }

    #[test]
    fn custom_bounds_in_message() {
        let validator = Validator::new(10, 12).ok();
        let errors = validator
            .map(|v| v.validate(&NewAccount::new("user", "name", "short")))
            .unwrap_or_default();
        assert_eq!(
            errors,
            vec!["Password must be between 10 and 12 characters".to_string()]
        );
    }
}
