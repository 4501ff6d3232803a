//! String commands
//!
//! Thin wrappers over the string command family. Every wrapper rewrites the
//! logical key under the configured header; mutating wrappers then apply
//! the default-expiration policy (the caller's TTL when given, else the
//! configured default, skipped when the resolved value is zero or
//! negative).

use std::sync::Arc;

use redis::AsyncCommands;

use crate::client::ClientInner;
use crate::error::Result;

pub struct StringCommands {
    inner: Arc<ClientInner>,
}

impl StringCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn full(&self, key: &str) -> String {
        self.inner.keyspace.with_header(key)
    }

    pub async fn set(&self, key: &str, value: &str, seconds: Option<i64>) -> Result<()> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let _: () = conn.set(&key, value).await?;
        self.inner.touch_expire(&key, seconds).await
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: Option<String> = conn.get(&key).await?;
        Ok(value)
    }

    /// INCR, followed by the default-expiration policy. The lock manager is
    /// built on the same increment-creates-at-one store guarantee.
    pub async fn incr(&self, key: &str, seconds: Option<i64>) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: i64 = conn.incr(&key, 1i64).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    pub async fn incr_by(&self, key: &str, increment: i64, seconds: Option<i64>) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: i64 = conn.incr(&key, increment).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    pub async fn incr_by_float(
        &self,
        key: &str,
        increment: f64,
        seconds: Option<i64>,
    ) -> Result<f64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: f64 = conn.incr(&key, increment).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    pub async fn decr(&self, key: &str, seconds: Option<i64>) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: i64 = conn.decr(&key, 1i64).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    pub async fn decr_by(&self, key: &str, decrement: i64, seconds: Option<i64>) -> Result<i64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: i64 = conn.decr(&key, decrement).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(value)
    }

    /// SETNX; the expiration policy runs only when the key was actually set
    pub async fn set_nx(&self, key: &str, value: &str, seconds: Option<i64>) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let set: bool = conn.set_nx(&key, value).await?;
        if set {
            self.inner.touch_expire(&key, seconds).await?;
        }
        Ok(set)
    }

    /// SETEX: value and TTL in one round-trip
    pub async fn set_ex(&self, key: &str, value: &str, seconds: u64) -> Result<()> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let _: () = conn.set_ex(&key, value, seconds).await?;
        Ok(())
    }

    /// PSETEX: like SETEX with a millisecond TTL
    pub async fn pset_ex(&self, key: &str, value: &str, milliseconds: u64) -> Result<()> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let _: () = conn.pset_ex(&key, value, milliseconds).await?;
        Ok(())
    }

    pub async fn get_range(&self, key: &str, start: isize, end: isize) -> Result<String> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: String = conn.getrange(&key, start, end).await?;
        Ok(value)
    }

    pub async fn set_range(
        &self,
        key: &str,
        offset: isize,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.setrange(&key, offset, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    pub async fn get_set(
        &self,
        key: &str,
        value: &str,
        seconds: Option<i64>,
    ) -> Result<Option<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let previous: Option<String> = conn.getset(&key, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(previous)
    }

    pub async fn append(&self, key: &str, value: &str, seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.append(&key, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(length)
    }

    pub async fn strlen(&self, key: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let length: u64 = conn.strlen(&key).await?;
        Ok(length)
    }

    pub async fn set_bit(
        &self,
        key: &str,
        offset: usize,
        value: bool,
        seconds: Option<i64>,
    ) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let previous: bool = conn.setbit(&key, offset, value).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(previous)
    }

    pub async fn get_bit(&self, key: &str, offset: usize) -> Result<bool> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let value: bool = conn.getbit(&key, offset).await?;
        Ok(value)
    }

    /// MSET. A TTL is applied only when explicitly supplied; it costs one
    /// EXPIRE round-trip per key.
    pub async fn mset(&self, pairs: &[(&str, &str)], seconds: Option<i64>) -> Result<()> {
        let rewritten = self.inner.keyspace.with_headers(pairs.iter().copied());
        let mut conn = self.inner.connection();
        let mut cmd = redis::cmd("MSET");
        for (key, value) in &rewritten {
            cmd.arg(key).arg(value);
        }
        let _: () = cmd.query_async(&mut conn).await?;

        if let Some(ttl) = seconds {
            if ttl > 0 {
                for (key, _) in &rewritten {
                    self.inner.apply_expire(key, ttl).await?;
                }
            }
        }
        Ok(())
    }

    /// MSETNX: all-or-nothing variant; per-key EXPIRE failures are ignored
    pub async fn mset_nx(&self, pairs: &[(&str, &str)], seconds: Option<i64>) -> Result<bool> {
        let rewritten = self.inner.keyspace.with_headers(pairs.iter().copied());
        let mut conn = self.inner.connection();
        let mut cmd = redis::cmd("MSETNX");
        for (key, value) in &rewritten {
            cmd.arg(key).arg(value);
        }
        let set: bool = cmd.query_async(&mut conn).await?;

        if let Some(ttl) = seconds {
            if ttl > 0 {
                for (key, _) in &rewritten {
                    let _ = self.inner.apply_expire(key, ttl).await;
                }
            }
        }
        Ok(set)
    }

    pub async fn mget(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let full_keys: Vec<String> = keys.iter().map(|key| self.full(key)).collect();
        let mut conn = self.inner.connection();
        let mut cmd = redis::cmd("MGET");
        for key in &full_keys {
            cmd.arg(key);
        }
        let values: Vec<Option<String>> = cmd.query_async(&mut conn).await?;
        Ok(values)
    }
}
