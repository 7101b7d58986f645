use anyhow::Result;
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicI64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::sync::RwLock;

use super::{InsertOutcome, UserRecord, UserStore};

/// Process-local user store. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(
        &self,
        user_id: &str,
        name: &str,
        password_hash: &[u8],
    ) -> Result<InsertOutcome> {
        let mut users = self.users.write().await;
        if users.contains_key(user_id) {
            return Ok(InsertOutcome::Conflict);
        }

        let record = UserRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id: user_id.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_vec(),
            created_at_unix: unix_now(),
        };
        users.insert(user_id.to_string(), record);

        Ok(InsertOutcome::Created)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool> {
        Ok(self.users.write().await.remove(user_id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_find() -> Result<()> {
        let store = MemoryUserStore::new();
        let outcome = store.insert_user("valid_user", "valid_user_name", b"hash").await?;
        assert_eq!(outcome, InsertOutcome::Created);

        let record = store.find_user("valid_user").await?;
        assert_eq!(record.as_ref().map(|r| r.name.as_str()), Some("valid_user_name"));
        assert_eq!(record.map(|r| r.password_hash), Some(b"hash".to_vec()));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_user_id_conflicts() -> Result<()> {
        let store = MemoryUserStore::new();
        store.insert_user("valid_user", "first", b"hash").await?;
        let outcome = store.insert_user("valid_user", "second", b"other").await?;
        assert_eq!(outcome, InsertOutcome::Conflict);
        assert_eq!(store.len().await, 1);

        let record = store.find_user("valid_user").await?;
        assert_eq!(record.map(|r| r.name), Some("first".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_sequential() -> Result<()> {
        let store = MemoryUserStore::new();
        store.insert_user("a", "a", b"h").await?;
        store.insert_user("b", "b", b"h").await?;
        assert_eq!(store.find_user("a").await?.map(|r| r.id), Some(1));
        assert_eq!(store.find_user("b").await?.map(|r| r.id), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_row() -> Result<()> {
        let store = MemoryUserStore::new();
        store.insert_user("valid_user", "name", b"hash").await?;
        assert!(store.delete_user("valid_user").await?);
        assert!(!store.delete_user("valid_user").await?);
        assert!(store.find_user("valid_user").await?.is_none());
        assert!(store.is_empty().await);
        Ok(())
    }
}
