//! Generic key commands

use std::sync::Arc;

use redis::AsyncCommands;

use crate::client::ClientInner;
use crate::error::Result;

/// Wrappers for key lifecycle commands. Keys returned by scanning-style
/// operations (`keys`, `random_key`) have the header stripped back off.
pub struct KeyCommands {
    inner: Arc<ClientInner>,
}

impl KeyCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn full(&self, key: &str) -> String {
        self.inner.keyspace.with_header(key)
    }

    pub async fn delete(&self, key: &str) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: i64 = conn.del(&key).await?;
        Ok(removed)
    }

    /// EXPIRE, honoring the configured expire-error policy
    pub async fn expire(&self, key: &str, seconds: i64) -> Result<()> {
        let key = self.full(key);
        self.inner.apply_expire(&key, seconds).await?;
        Ok(())
    }

    pub async fn expire_at(&self, key: &str, unix_time_seconds: i64) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let set: bool = conn.expire_at(&key, unix_time_seconds).await?;
        Ok(set)
    }

    pub async fn pexpire_at(&self, key: &str, unix_time_milliseconds: i64) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let set: bool = conn.pexpire_at(&key, unix_time_milliseconds).await?;
        Ok(set)
    }

    pub async fn ttl(&self, key: &str) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let ttl: i64 = conn.ttl(&key).await?;
        Ok(ttl)
    }

    pub async fn pttl(&self, key: &str) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let ttl: i64 = conn.pttl(&key).await?;
        Ok(ttl)
    }

    pub async fn persist(&self, key: &str) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: bool = conn.persist(&key).await?;
        Ok(removed)
    }

    pub async fn exists(&self, keys: &[&str]) -> Result<i64> {
        let full_keys: Vec<String> = keys.iter().map(|key| self.full(key)).collect();
        let mut conn = self.inner.connection();
        let count: i64 = conn.exists(&full_keys).await?;
        Ok(count)
    }

    pub async fn key_type(&self, key: &str) -> Result<String> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: String = conn.key_type(&key).await?;
        Ok(value)
    }

    /// RENAME; both the source and destination are rewritten
    pub async fn rename(&self, key: &str, new_key: &str) -> Result<()> {
        let key = self.full(key);
        let new_key = self.full(new_key);
        let mut conn = self.inner.connection();
        let _: () = conn.rename(&key, &new_key).await?;
        Ok(())
    }

    pub async fn rename_nx(&self, key: &str, new_key: &str) -> Result<bool> {
        let key = self.full(key);
        let new_key = self.full(new_key);
        let mut conn = self.inner.connection();
        let renamed: bool = conn.rename_nx(&key, &new_key).await?;
        Ok(renamed)
    }

    /// KEYS; results have the header stripped back to logical keys
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.inner.connection();
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys
            .iter()
            .map(|key| self.inner.keyspace.strip_header(key))
            .collect())
    }

    pub async fn random_key(&self) -> Result<Option<String>> {
        let mut conn = self.inner.connection();
        let key: Option<String> = redis::cmd("RANDOMKEY").query_async(&mut conn).await?;
        Ok(key.map(|key| self.inner.keyspace.strip_header(&key)))
    }

    /// DUMP; nil when the key is absent
    pub async fn dump(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let payload: Option<Vec<u8>> = redis::cmd("DUMP").arg(&key).query_async(&mut conn).await?;
        Ok(payload)
    }

    /// MOVE the key to another database of the same server
    pub async fn move_db(&self, key: &str, db: i64) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let moved: bool = redis::cmd("MOVE")
            .arg(&key)
            .arg(db)
            .query_async(&mut conn)
            .await?;
        Ok(moved)
    }
}
