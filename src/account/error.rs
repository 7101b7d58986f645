use thiserror::Error;

/// Failures surfaced by the account service.
///
/// Only `Store` is a server fault; the others are answers for the user.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid account: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("user id is already used")]
    Conflict,
    #[error("invalid credentials")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AccountError {
    /// Messages to show on the form for user-facing failures.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.clone(),
            Self::Conflict => vec![CONFLICT_MESSAGE.to_string()],
            Self::Unauthorized => vec![UNAUTHORIZED_MESSAGE.to_string()],
            Self::Store(_) => vec![STORE_MESSAGE.to_string()],
        }
    }
}

pub const CONFLICT_MESSAGE: &str = "This user ID is already used";
pub const UNAUTHORIZED_MESSAGE: &str = "User ID or password is incorrect";
pub const STORE_MESSAGE: &str = "Something went wrong, please try again later";
