//! Advisory distributed locks
//!
//! Mutual exclusion is built on the store's atomic INCR: the key is created
//! at 1 for exactly one caller per creation-to-expiry window, and every
//! other caller observes a larger value. The manager holds no in-process
//! state between calls; the lock key's presence and TTL are the entire
//! lock state.
//!
//! `release` is unconditional. When a slow holder must not be able to
//! delete a successor's lock, use the token-tagged pair
//! `acquire_with_token`/`release_with_token`, which stores a per-holder
//! UUID at a companion key and only releases on a match.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::keyspace::KeySpace;
use crate::options::ClientOptions;

const LOCK_PREFIX: &str = "lock:";
const LOCK_VALUE_PREFIX: &str = "lock:value";

/// Store operations the lock manager is built on.
///
/// `increment` must be atomic and must create absent keys at value 1; that
/// guarantee is the sole source of mutual exclusion. Keys are already
/// fully qualified. `set` with `Some(seconds)` requires a positive value.
#[async_trait]
pub trait LockStore: Send + Sync {
    async fn increment(&self, key: &str) -> Result<i64>;
    async fn expire(&self, key: &str, seconds: i64) -> Result<bool>;
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn delete(&self, key: &str) -> Result<i64>;
    async fn set(&self, key: &str, value: &str, seconds: Option<i64>) -> Result<()>;
}

/// `LockStore` over a Redis connection manager
pub struct RedisLockStore {
    manager: ConnectionManager,
}

impl RedisLockStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn increment(&self, key: &str) -> Result<i64> {
        let mut conn = self.manager.clone();
        let value: i64 = conn.incr(key, 1i64).await?;
        Ok(value)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool> {
        let mut conn = self.manager.clone();
        let set: bool = conn.expire(key, seconds).await?;
        Ok(set)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<i64> {
        let mut conn = self.manager.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed)
    }

    async fn set(&self, key: &str, value: &str, seconds: Option<i64>) -> Result<()> {
        let mut conn = self.manager.clone();
        match seconds {
            Some(ttl) => {
                let _: () = conn.set_ex(key, value, ttl as u64).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }
}

/// Per-call acquisition options
#[derive(Clone, Debug, Default)]
pub struct LockOptions {
    /// Retry on contention instead of failing fast
    pub blocking: bool,
    /// TTL for the lock key; `None` uses the configured default, zero or
    /// negative leaves the key without expiration
    pub seconds: Option<i64>,
    /// Total wait budget; the retry cap is derived as
    /// `floor(timeout / retry_delay)`
    pub timeout: Option<Duration>,
    /// Explicit retry cap; wins over `timeout` when both are given
    pub max_retry_times: Option<u32>,
    /// Delay between retries; `None` uses the configured default
    pub retry_delay: Option<Duration>,
}

impl LockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retry_times(mut self, times: u32) -> Self {
        self.max_retry_times = Some(times);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }
}

/// Advisory lock manager over a [`LockStore`]
pub struct LockManager<S> {
    store: S,
    keyspace: KeySpace,
    options: ClientOptions,
}

impl<S: LockStore> LockManager<S> {
    /// Build a manager from a store and an explicit configuration; the
    /// manager keeps no other state, so multiple independently configured
    /// managers can coexist in one process.
    pub fn new(store: S, keyspace: KeySpace, options: ClientOptions) -> Self {
        Self {
            store,
            keyspace,
            options,
        }
    }

    fn lock_key(&self, name: &str) -> String {
        self.keyspace.with_header(&format!("{LOCK_PREFIX}{name}"))
    }

    fn value_key(&self, name: &str) -> String {
        self.keyspace
            .with_header(&format!("{LOCK_VALUE_PREFIX}{name}"))
    }

    /// Acquire the named lock.
    ///
    /// Non-blocking calls return `Ok(false)` on contention. Blocking calls
    /// sleep `retry_delay` between re-attempts and fail with
    /// [`ClientError::LockTimeout`] once the retry budget is exhausted.
    pub async fn acquire(&self, name: &str, options: &LockOptions) -> Result<bool> {
        self.acquire_inner(name, options, None).await
    }

    /// Like [`acquire`](Self::acquire), but a blocking wait can be
    /// abandoned through the token; cancellation returns `Ok(false)`.
    pub async fn acquire_with_cancel(
        &self,
        name: &str,
        options: &LockOptions,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        self.acquire_inner(name, options, Some(cancel)).await
    }

    /// Blocking acquire that never returns `false`. When the caller gives
    /// neither `timeout` nor `max_retry_times`, the configured
    /// `default_timeout` is applied as the wait budget.
    pub async fn acquire_blocking(&self, name: &str, options: &LockOptions) -> Result<()> {
        let mut options = options.clone();
        options.blocking = true;
        if options.timeout.is_none() && options.max_retry_times.is_none() {
            options.timeout = Some(self.options.default_timeout);
        }
        match self.acquire(name, &options).await? {
            true => Ok(()),
            false => Err(ClientError::LockTimeout {
                name: name.to_string(),
                attempts: 0,
            }),
        }
    }

    async fn acquire_inner(
        &self,
        name: &str,
        options: &LockOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<bool> {
        let key = self.lock_key(name);

        if self.try_increment(&key, options.seconds).await? {
            debug!(lock = name, "lock acquired");
            return Ok(true);
        }

        if !options.blocking {
            return Ok(false);
        }

        let retry_delay = options
            .retry_delay
            .unwrap_or(self.options.default_retry_delay);
        let max_retry_times = self.resolve_retry_cap(options, retry_delay);

        let mut times = 0u32;
        while times <= max_retry_times {
            times += 1;

            if let Some(token) = cancel {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(lock = name, "blocking acquire cancelled");
                        return Ok(false);
                    }
                    _ = tokio::time::sleep(retry_delay) => {}
                }
            } else {
                tokio::time::sleep(retry_delay).await;
            }

            if self.try_increment(&key, options.seconds).await? {
                debug!(lock = name, attempts = times + 1, "lock acquired after retry");
                return Ok(true);
            }
        }

        debug!(lock = name, attempts = times + 1, "lock wait exhausted");
        Err(ClientError::LockTimeout {
            name: name.to_string(),
            attempts: times + 1,
        })
    }

    /// Explicit `max_retry_times` wins over `timeout`; a timeout-derived
    /// cap is clamped to at least one retry; otherwise the configured
    /// default applies.
    fn resolve_retry_cap(&self, options: &LockOptions, retry_delay: Duration) -> u32 {
        if let Some(times) = options.max_retry_times {
            return times;
        }
        if let Some(timeout) = options.timeout {
            let cap = (timeout.as_secs_f64() / retry_delay.as_secs_f64()).floor() as u32;
            return cap.max(1);
        }
        self.options.default_retry_times
    }

    /// One INCR attempt. A result of exactly 1 means the counter was just
    /// created and this caller is the sole locker; only that caller goes on
    /// to set the TTL.
    async fn try_increment(&self, key: &str, seconds: Option<i64>) -> Result<bool> {
        let value = self.store.increment(key).await?;
        if value != 1 {
            return Ok(false);
        }

        let ttl = seconds.unwrap_or(self.options.default_expire_time);
        if ttl > 0 {
            if let Err(err) = self.store.expire(key, ttl).await {
                if self.options.throw_expire_error {
                    return Err(ClientError::ExpireSet {
                        key: key.to_string(),
                        source: Box::new(err),
                    });
                }
                warn!(key, error = %err, "failed to set lock TTL; lock will not auto-expire");
            }
        }
        Ok(true)
    }

    /// Release the named lock unconditionally. Any caller holding the name
    /// can release any holder's lock; see `release_with_token` for the
    /// guarded form.
    pub async fn release(&self, name: &str) -> Result<()> {
        let key = self.lock_key(name);
        self.store.delete(&key).await?;
        debug!(lock = name, "lock released");
        Ok(())
    }

    /// Acquire and tag the lock with a fresh UUID stored at the companion
    /// key. The token is the caller's only evidence of ownership; present
    /// it to [`release_with_token`](Self::release_with_token). Returns
    /// `Ok(None)` when a non-blocking acquire loses the race.
    pub async fn acquire_with_token(
        &self,
        name: &str,
        options: &LockOptions,
    ) -> Result<Option<String>> {
        if !self.acquire(name, options).await? {
            return Ok(None);
        }

        let token = Uuid::new_v4().to_string();
        let ttl = options.seconds.unwrap_or(self.options.default_expire_time);
        self.store
            .set(&self.value_key(name), &token, (ttl > 0).then_some(ttl))
            .await?;
        Ok(Some(token))
    }

    /// Release only if the stored companion token matches the presented
    /// one. A mismatch (or an expired companion key, which never equals a
    /// real token) means the lock has moved on to another holder, and the
    /// call is a no-op.
    pub async fn release_with_token(&self, name: &str, token: &str) -> Result<()> {
        match self.store.get(&self.value_key(name)).await? {
            Some(stored) if stored == token => self.release(name).await,
            _ => {
                debug!(lock = name, "token mismatch, release skipped");
                Ok(())
            }
        }
    }
}
