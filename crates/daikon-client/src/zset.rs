//! Sorted-set commands

use std::sync::Arc;

use redis::AsyncCommands;

use crate::client::ClientInner;
use crate::error::Result;
use crate::model::ScanOptions;

pub struct SortedSetCommands {
    inner: Arc<ClientInner>,
}

impl SortedSetCommands {
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

    pub async fn zadd(
        &self,
        key: &str,
        member: &str,
        score: f64,
        seconds: Option<i64>,
    ) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let added: u64 = conn.zadd(&key, member, score).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(added)
    }

    pub async fn zadd_multiple(
        &self,
        key: &str,
        members: &[(f64, &str)],
        seconds: Option<i64>,
    ) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let added: u64 = conn.zadd_multiple(&key, members).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(added)
    }

    pub async fn zrem(&self, key: &str, members: &[&str], seconds: Option<i64>) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.zrem(&key, members).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(removed)
    }

    pub async fn zcard(&self, key: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let cardinality: u64 = conn.zcard(&key).await?;
        Ok(cardinality)
    }

    pub async fn zcount(&self, key: &str, min: f64, max: f64) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let count: u64 = conn.zcount(&key, min, max).await?;
        Ok(count)
    }

    pub async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let score: Option<f64> = conn.zscore(&key, member).await?;
        Ok(score)
    }

    pub async fn zincr_by(
        &self,
        key: &str,
        increment: f64,
        member: &str,
        seconds: Option<i64>,
    ) -> Result<f64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let score: f64 = conn.zincr(&key, member, increment).await?;
        self.inner.touch_expire(&key, seconds).await?;
        Ok(score)
    }

    pub async fn zrank(&self, key: &str, member: &str) -> Result<Option<u64>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let rank: Option<u64> = conn.zrank(&key, member).await?;
        Ok(rank)
    }

    pub async fn zrevrank(&self, key: &str, member: &str) -> Result<Option<u64>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let rank: Option<u64> = conn.zrevrank(&key, member).await?;
        Ok(rank)
    }

    pub async fn zrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.zrange(&key, start, stop).await?;
        Ok(members)
    }

    pub async fn zrange_withscores(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(String, f64)>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<(String, f64)> = conn.zrange_withscores(&key, start, stop).await?;
        Ok(members)
    }

    pub async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.zrevrange(&key, start, stop).await?;
        Ok(members)
    }

    pub async fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.zrangebyscore(&key, min, max).await?;
        Ok(members)
    }

    pub async fn zrevrange_by_score(&self, key: &str, max: f64, min: f64) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = conn.zrevrangebyscore(&key, max, min).await?;
        Ok(members)
    }

    /// ZRANGEBYLEX; bounds use the lex syntax (`[a`, `(a`, `-`, `+`)
    pub async fn zrange_by_lex(
        &self,
        key: &str,
        min: &str,
        max: &str,
        offset: Option<isize>,
        count: Option<isize>,
    ) -> Result<Vec<String>> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let members: Vec<String> = match (offset, count) {
            (Some(offset), Some(count)) => {
                conn.zrangebylex_limit(&key, min, max, offset, count).await?
            }
            _ => conn.zrangebylex(&key, min, max).await?,
        };
        Ok(members)
    }

    pub async fn zlexcount(&self, key: &str, min: &str, max: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let count: u64 = conn.zlexcount(&key, min, max).await?;
        Ok(count)
    }

    pub async fn zremrange_by_rank(&self, key: &str, start: isize, stop: isize) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.zremrangebyrank(&key, start, stop).await?;
        Ok(removed)
    }

    pub async fn zremrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.zrembyscore(&key, min, max).await?;
        Ok(removed)
    }

    pub async fn zremrange_by_lex(&self, key: &str, min: &str, max: &str) -> Result<u64> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let removed: u64 = conn.zrembylex(&key, min, max).await?;
        Ok(removed)
    }

    pub async fn zunionstore(
        &self,
        destination: &str,
        source: &str,
        others: &[&str],
        seconds: Option<i64>,
    ) -> Result<u64> {
        let destination = self.full(destination);
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let stored: u64 = conn.zunionstore(&destination, &keys).await?;
        self.inner.touch_expire(&destination, seconds).await?;
        Ok(stored)
    }

    pub async fn zinterstore(
        &self,
        destination: &str,
        source: &str,
        others: &[&str],
        seconds: Option<i64>,
    ) -> Result<u64> {
        let destination = self.full(destination);
        let keys = self.full_many(source, others);
        let mut conn = self.inner.connection();
        let stored: u64 = conn.zinterstore(&destination, &keys).await?;
        self.inner.touch_expire(&destination, seconds).await?;
        Ok(stored)
    }

    /// ZSCAN one step of the cursor; elements alternate member and score
    pub async fn zscan(
        &self,
        key: &str,
        cursor: u64,
        options: &ScanOptions,
    ) -> Result<(u64, Vec<String>)> {
        let key = self.full(key);
        let mut conn = self.inner.connection();
        let mut cmd = redis::cmd("ZSCAN");
        cmd.arg(&key).arg(cursor);
        if let Some(pattern) = &options.pattern {
            cmd.arg("MATCH").arg(pattern);
        }
        if let Some(count) = options.count {
            cmd.arg("COUNT").arg(count);
        }
        let (next, elements): (u64, Vec<String>) = cmd.query_async(&mut conn).await?;
        Ok((next, elements))
    }
}
