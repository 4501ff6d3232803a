//! List commands

use std::num::NonZeroUsize;
use std::sync::Arc;

use redis::AsyncCommands;

use crate::client::ClientInner;
use crate::error::Result;

pub struct ListCommands {
    inner: Arc<ClientInner>,
}

impl ListCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn full(&self, key: &str) -> String {
        self.inner.keyspace.with_header(key)
    }

    pub async fn lpush(&self, key: &str, values: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.lpush(&key, values).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    pub async fn rpush(&self, key: &str, values: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.rpush(&key, values).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    /// LPUSHX: push only when the list already exists
    pub async fn lpushx(&self, key: &str, values: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.lpush_exists(&key, values).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    pub async fn rpushx(&self, key: &str, values: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.rpush_exists(&key, values).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    pub async fn lpop(&self, key: &str, count: Option<NonZeroUsize>) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let values: Vec<String> = conn.lpop(&key, count).await?;
        Ok(values)
    }

    pub async fn rpop(&self, key: &str, count: Option<NonZeroUsize>) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let values: Vec<String> = conn.rpop(&key, count).await?;
        Ok(values)
    }

    pub async fn lindex(&self, key: &str, index: isize) -> Result<Option<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: Option<String> = conn.lindex(&key, index).await?;
        Ok(value)
    }

    pub async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let values: Vec<String> = conn.lrange(&key, start, stop).await?;
        Ok(values)
    }

    pub async fn llen(&self, key: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.llen(&key).await?;
        Ok(length)
    }

    pub async fn lrem(
        &self,
        key: &str,
        count: isize,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.lrem(&key, count, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(removed)
    }

    pub async fn ltrim(
        &self,
        key: &str,
        start: isize,
        stop: isize,
        seconds: Option<i64>,
    ) -> Result<()> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let _: () = conn.ltrim(&key, start, stop).await?;
        self.inner.touch_expire(&key, seconds).await
    }

    pub async fn lset(
        &self,
        key: &str,
        index: isize,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<()> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let _: () = conn.lset(&key, index, value).await?;
        self.inner.touch_expire(&key, seconds).await
    }

    pub async fn linsert_before(
        &self,
        key: &str,
        pivot: &str,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: i64 = conn.linsert_before(&key, pivot, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    pub async fn linsert_after(
        &self,
        key: &str,
        pivot: &str,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: i64 = conn.linsert_after(&key, pivot, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    /// BLPOP across one or more lists; a zero timeout blocks indefinitely
    pub async fn blpop(&self, keys: &[&str], timeout: f64) -> Result<Option<(String, String)>> {
        let full_keys: Vec<String> = keys.iter().map(|key| self.full(key)).collect();
        let mut conn = self.inner.connection();
        let popped: Option<(String, String)> = conn.blpop(&full_keys, timeout).await?;
        Ok(popped.map(|(key, value)| (self.inner.keyspace.strip_header(&key), value)))
    }

    pub async fn brpop(&self, keys: &[&str], timeout: f64) -> Result<Option<(String, String)>> {
        let full_keys: Vec<String> = keys.iter().map(|key| self.full(key)).collect();
        let mut conn = self.inner.connection();
        let popped: Option<(String, String)> = conn.brpop(&full_keys, timeout).await?;
        Ok(popped.map(|(key, value)| (self.inner.keyspace.strip_header(&key), value)))
    }

    pub async fn rpoplpush(&self, source: &str, destination: &str) -> Result<Option<String>> {
        let source = self.full(source);
        let destination = self.full(destination);
        let mut conn = self.inner.connection();
        let value: Option<String> = conn.rpoplpush(&source, &destination).await?;
        Ok(value)
    }

    pub async fn brpoplpush(
        &self,
        source: &str,
        destination: &str,
        timeout: f64,
    ) -> Result<Option<String>> {
        let source = self.full(source);
        let destination = self.full(destination);
        let mut conn = self.inner.connection();
        let value: Option<String> = conn.brpoplpush(&source, &destination, timeout).await?;
        Ok(value)
    }
}
