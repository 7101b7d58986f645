//! Persistence for user accounts.
//!
//! `UserStore` is the seam between the account service and the database. The
//! Postgres store backs real deployments; the in-memory store keeps the same
//! contract for local runs and tests.

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use anyhow::Result;
use async_trait::async_trait;

/// Outcome of inserting a new user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// The `user_id` is already taken; nothing was written.
    Conflict,
}

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub password_hash: Vec<u8>,
    pub created_at_unix: i64,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, reporting a uniqueness conflict as `InsertOutcome::Conflict`.
    async fn insert_user(
        &self,
        user_id: &str,
        name: &str,
        password_hash: &[u8],
    ) -> Result<InsertOutcome>;

    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>>;

    /// Returns `true` when a row was removed.
    async fn delete_user(&self, user_id: &str) -> Result<bool>;

    /// Liveness check used by `/health`.
    async fn ping(&self) -> Result<()>;

    /// Short name reported in logs and health output.
    fn kind(&self) -> &'static str;
}
