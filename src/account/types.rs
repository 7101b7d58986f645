//! Form payloads accepted by the account endpoints.

use serde::Deserialize;
use std::fmt;

/// Registration form. Missing fields deserialize as empty strings so they are
/// reported by the validator instead of rejected by the extractor.
#[derive(Deserialize, Clone, Default)]
pub struct NewAccount {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

impl NewAccount {
    #[must_use]
    pub fn new(user_id: &str, name: &str, password: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}

/// Login form.
#[derive(Deserialize, Clone, Default)]
pub struct Credentials {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(user_id: &str, password: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_passwords() {
        let account = NewAccount::new("valid_user", "valid_user_name", "12345678");
        let rendered = format!("{account:?}");
        assert!(rendered.contains("valid_user"));
        assert!(!rendered.contains("12345678"));

        let credentials = Credentials::new("valid_user", "12345678");
        assert!(!format!("{credentials:?}").contains("12345678"));
    }
}
