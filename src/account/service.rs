//! Registration and login orchestration.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    error::AccountError,
    password::{dummy_hash, hash_password, verify_password},
    store::{InsertOutcome, UserRecord, UserStore},
    types::{Credentials, NewAccount},
    validation::Validator,
};

pub const PASSWORD_PROCESSING_FAILED: &str = "Password could not be processed";

type VerifyFn = fn(&str, &[u8]) -> bool;

/// Composes validation, hashing and persistence.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct AccountService {
    store: Arc<dyn UserStore>,
    validator: Validator,
    verify: VerifyFn,
}

impl AccountService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, validator: Validator) -> Self {
        Self {
            store,
            validator,
            verify: verify_password,
        }
    }

    #[cfg(test)]
    fn with_verifier(mut self, verify: VerifyFn) -> Self {
        self.verify = verify;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate, hash and persist a new account.
    ///
    /// # Errors
    /// `Validation` for rejected input (including a failed hash), `Conflict`
    /// when the `user_id` is taken, `Store` for database faults.
    #[instrument(skip_all, fields(user_id = %account.user_id))]
    pub async fn register(&self, account: NewAccount) -> Result<(), AccountError> {
        let errors = self.validator.validate(&account);
        if !errors.is_empty() {
            return Err(AccountError::Validation(errors));
        }

        let NewAccount {
            user_id,
            name,
            password,
        } = account;

        // Argon2 is CPU bound; keep it off the async workers.
        let password_hash = match tokio::task::spawn_blocking(move || hash_password(&password))
            .await
        {
            Ok(Ok(hash)) => hash,
            Ok(Err(err)) => {
                warn!("Failed to hash password: {err:#}");
                return Err(AccountError::Validation(vec![
                    PASSWORD_PROCESSING_FAILED.to_string(),
                ]));
            }
            Err(err) => {
                warn!("Password hashing task failed: {err}");
                return Err(AccountError::Validation(vec![
                    PASSWORD_PROCESSING_FAILED.to_string(),
                ]));
            }
        };

        match self.store.insert_user(&user_id, &name, &password_hash).await? {
            InsertOutcome::Created => {
                info!("Account created");
                Ok(())
            }
            InsertOutcome::Conflict => Err(AccountError::Conflict),
        }
    }

    /// Check credentials and return the matching account.
    ///
    /// Unknown `user_id` and wrong password are the same `Unauthorized` error,
    /// and both run one Argon2 verification.
    ///
    /// # Errors
    /// `Unauthorized` on any mismatch, `Store` for database faults
    #[instrument(skip_all, fields(user_id = %credentials.user_id))]
    pub async fn authenticate(&self, credentials: Credentials) -> Result<UserRecord, AccountError> {
        let record = self.store.find_user(&credentials.user_id).await?;

        let password = credentials.password;
        let stored_hash = record
            .as_ref()
            .map_or_else(|| dummy_hash().to_vec(), |r| r.password_hash.clone());
        let verify = self.verify;
        let verified =
            match tokio::task::spawn_blocking(move || verify(&password, &stored_hash)).await {
                Ok(verified) => verified,
                Err(err) => {
                    warn!("Password verification task failed: {err}");
                    false
                }
            };

        match record {
            Some(record) if verified => Ok(record),
            _ => Err(AccountError::Unauthorized),
        }
    }
}
