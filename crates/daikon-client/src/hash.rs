//! Hash commands

use std::collections::HashMap;
use std::sync::Arc;

use redis::AsyncCommands;

use crate::client::ClientInner;
use crate::error::Result;

pub struct HashCommands {
    inner: Arc<ClientInner>,
}

impl HashCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn full(&self, key: &str) -> String {
        self.inner.keyspace.with_header(key)
    }

    pub async fn hset(
        &self,
        key: &str,
        field: &str,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let created: bool = conn.hset(&key, field, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(created)
    }

    /// HSETNX; the expiration policy runs only when the field was created
    pub async fn hset_nx(
        &self,
        key: &str,
        field: &str,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let created: bool = conn.hset_nx(&key, field, value).await?;
        if created {
            self.inner.touch_expire(&key, seconds).await?;
        }
        Ok(created)
    }

    pub async fn hmset(
        &self,
        key: &str,
        pairs: &[(&str, &str)],
        seconds: Option<i64>,
    ) -> Result<()> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let _: () = conn.hset_multiple(&key, pairs).await?;
        self.inner.touch_expire(&key, seconds).await
    }

    pub async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: Option<String> = conn.hget(&key, field).await?;
        Ok(value)
    }

    pub async fn hmget(&self, key: &str, fields: &[&str]) -> Result<Vec<Option<String>>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let mut cmd = redis::cmd("HMGET");
        cmd.arg(&key);
        for field in fields {
            cmd.arg(field);
        }
        let values: Vec<Option<String>> = cmd.query_async(&mut conn).await?;
        Ok(values)
    }

    pub async fn hget_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let entries: HashMap<String, String> = conn.hgetall(&key).await?;
        Ok(entries)
    }

    pub async fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.hdel(&key, fields).await?;
        Ok(removed)
    }

    pub async fn hexists(&self, key: &str, field: &str) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let exists: bool = conn.hexists(&key, field).await?;
        Ok(exists)
    }

    pub async fn hincr_by(
        &self,
        key: &str,
        field: &str,
        increment: i64,
        seconds: Option<i64>,
    ) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: i64 = conn.hincr(&key, field, increment).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    pub async fn hincr_by_float(
        &self,
        key: &str,
        field: &str,
        increment: f64,
        seconds: Option<i64>,
    ) -> Result<f64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: f64 = conn.hincr(&key, field, increment).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    pub async fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let fields: Vec<String> = conn.hkeys(&key).await?;
        Ok(fields)
    }

    pub async fn hvals(&self, key: &str) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let values: Vec<String> = conn.hvals(&key).await?;
        Ok(values)
    }

    pub async fn hlen(&self, key: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.hlen(&key).await?;
        Ok(length)
    }
}
