//! Set commands

use std::sync::Arc;

use redis::AsyncCommands;

use crate::client::ClientInner;
use crate::error::Result;
use crate::model::ScanOptions;

pub struct SetCommands {
    inner: Arc<ClientInner>,
}

impl SetCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn full(&self, key: &str) -> String {
        self.inner.keyspace.with_header(key)
    }

    fn full_many(&self, source: &str, others: &[&str]) -> Vec<String> {
        let mut keys = Vec::with_capacity(others.len() + 1);
        keys.push(self.full(source));
        keys.extend(others.iter().map(|key| self.full(key)));
        keys
    }

    pub async fn sadd(&self, key: &str, members: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let added: u64 = conn.sadd(&key, members).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(added)
    }

    pub async fn srem(&self, key: &str, members: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.srem(&key, members).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(removed)
    }

    pub async fn spop(&self, key: &str, count: u64) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = redis::cmd("SPOP")
            .arg(&key)
            .arg(count)
            .query_async(&mut conn)
            .await?;
        Ok(members)
    }

    pub async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.smembers(&key).await?;
        Ok(members)
    }

    pub async fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let is_member: bool = conn.sismember(&key, member).await?;
        Ok(is_member)
    }

    pub async fn scard(&self, key: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let cardinality: u64 = conn.scard(&key).await?;
        Ok(cardinality)
    }

    pub async fn srandmember(&self, key: &str, count: usize) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.srandmember_multiple(&key, count).await?;
        Ok(members)
    }

    pub async fn smove(&self, source: &str, destination: &str, member: &str) -> Result<bool> {
        let source = self.full(source);
        let destination = self.full(destination);
        let mut conn = self.inner.connection();
        let moved: bool = conn.smove(&source, &destination, member).await?;
        Ok(moved)
    }

    pub async fn sdiff(&self, source: &str, others: &[&str]) -> Result<Vec<String>> {
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.sdiff(&keys).await?;
        Ok(members)
    }

    pub async fn sdiffstore(
        &self,
        destination: &str,
        source: &str,
        others: &[&str],
        seconds: Option<i64>,
    ) -> Result<u64> {
        let destination = self.full(destination);
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let stored: u64 = conn.sdiffstore(&destination, &keys).await?;
        self.inner.touch_expire(&destination, seconds).await?;
        Ok(stored)
    }

    pub async fn sinter(&self, source: &str, others: &[&str]) -> Result<Vec<String>> {
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.sinter(&keys).await?;
        Ok(members)
    }

    pub async fn sinterstore(
        &self,
        destination: &str,
        source: &str,
        others: &[&str],
        seconds: Option<i64>,
    ) -> Result<u64> {
        let destination = self.full(destination);
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let stored: u64 = conn.sinterstore(&destination, &keys).await?;
        self.inner.touch_expire(&destination, seconds).await?;
        Ok(stored)
    }

    pub async fn sunion(&self, source: &str, others: &[&str]) -> Result<Vec<String>> {
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.sunion(&keys).await?;
        Ok(members)
    }

    pub async fn sunionstore(
        &self,
        destination: &str,
        source: &str,
        others: &[&str],
        seconds: Option<i64>,
    ) -> Result<u64> {
        let destination = self.full(destination);
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let stored: u64 = conn.sunionstore(&destination, &keys).await?;
        self.inner.touch_expire(&destination, seconds).await?;
        Ok(stored)
    }

    /// SSCAN one step of the cursor
    pub async fn sscan(
        &self,
        key: &str,
        cursor: u64,
        options: &ScanOptions,
    ) -> Result<(u64, Vec<String>)> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let mut cmd = redis::cmd("SSCAN");
        cmd.arg(&key).arg(cursor);
        if let Some(pattern) = &options.pattern {
            cmd.arg("MATCH").arg(pattern);
        }
        if let Some(count) = options.count {
            cmd.arg("COUNT").arg(count);
        }
        let (next, members): (u64, Vec<String>) = cmd.query_async(&mut conn).await?;
        Ok((next, members))
    }
}
