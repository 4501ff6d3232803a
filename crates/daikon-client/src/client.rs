//! Client facade
//!
//! `DaikonClient` owns the connection manager and configuration, and hands
//! out cheap per-command-group handles. The most common operations are also
//! exposed directly on the facade.

use std::sync::Arc;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::hash::HashCommands;
use crate::json::JsonCommands;
use crate::key::KeyCommands;
use crate::keyspace::KeySpace;
use crate::list::ListCommands;
use crate::lock::{LockManager, RedisLockStore};
use crate::options::ClientOptions;
use crate::set::SetCommands;
use crate::string::StringCommands;
use crate::transaction::TransactionCommands;
use crate::zset::SortedSetCommands;

/// Shared state behind every command-group handle
pub(crate) struct ClientInner {
    pub(crate) manager: ConnectionManager,
    pub(crate) options: ClientOptions,
    pub(crate) keyspace: KeySpace,
}

impl ClientInner {
    /// Clone the multiplexed connection handle for one command sequence
    pub(crate) fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

    /// Set a TTL on an already fully-qualified key, honoring the
    /// expire-error policy: failures are swallowed unless
    /// `throw_expire_error` is set.
    pub(crate) async fn apply_expire(&self, key: &str, seconds: i64) -> Result<bool> {
        let mut conn = self.connection();
        match conn.expire(key, seconds).await {
            Ok(set) => Ok(set),
            Err(err) if !self.options.throw_expire_error => {
                debug!(key, error = %err, "EXPIRE failed; continuing without TTL");
                Ok(true)
            }
            Err(err) => Err(ClientError::ExpireSet {
                key: key.to_string(),
                source: Box::new(err.into()),
            }),
        }
    }

    /// Apply the default-expiration policy after a mutating command: use the
    /// caller's TTL when given, else the configured default; skip entirely
    /// when the resolved TTL is zero or negative.
    pub(crate) async fn touch_expire(&self, key: &str, seconds: Option<i64>) -> Result<()> {
        let ttl = seconds.unwrap_or(self.options.default_expire_time);
        if ttl > 0 {
            self.apply_expire(key, ttl).await?;
        }
        Ok(())
    }
}

/// Namespaced Redis convenience client
#[derive(Clone)]
pub struct DaikonClient {
    inner: Arc<ClientInner>,
}

impl DaikonClient {
    /// Connect to a Redis server and build a client around the connection
    pub async fn connect(url: &str, options: ClientOptions) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self::with_manager(manager, options))
    }

    /// Wrap an existing connection manager
    pub fn with_manager(manager: ConnectionManager, options: ClientOptions) -> Self {
        let keyspace = KeySpace::new(options.key_header.clone());
        Self {
            inner: Arc::new(ClientInner {
                manager,
                options,
                keyspace,
            }),
        }
    }

    /// String commands (GET/SET/INCR family)
    pub fn strings(&self) -> StringCommands {
        StringCommands::new(self.inner.clone())
    }

    /// Generic key commands (DEL/EXPIRE/TTL family)
    pub fn keys(&self) -> KeyCommands {
        KeyCommands::new(self.inner.clone())
    }

    /// List commands
    pub fn lists(&self) -> ListCommands {
        ListCommands::new(self.inner.clone())
    }

    /// Hash commands
    pub fn hashes(&self) -> HashCommands {
        HashCommands::new(self.inner.clone())
    }

    /// Set commands
    pub fn sets(&self) -> SetCommands {
        SetCommands::new(self.inner.clone())
    }

    /// Sorted-set commands
    pub fn sorted_sets(&self) -> SortedSetCommands {
        SortedSetCommands::new(self.inner.clone())
    }

    /// JSON marshal/unmarshal helpers over the string commands
    pub fn json(&self) -> JsonCommands {
        JsonCommands::new(self.inner.clone())
    }

    /// MULTI/pipeline batching with key-header rewriting
    pub fn transactions(&self) -> TransactionCommands {
        TransactionCommands::new(self.inner.clone())
    }

    /// Advisory distributed lock manager
    pub fn lock(&self) -> LockManager<RedisLockStore> {
        LockManager::new(
            RedisLockStore::new(self.inner.manager.clone()),
            self.inner.keyspace.clone(),
            self.inner.options.clone(),
        )
    }

    /// The raw multiplexed connection, for commands this crate does not wrap
    pub fn connection(&self) -> ConnectionManager {
        self.inner.connection()
    }

    /// The active configuration
    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    /// The key namespacer
    pub fn keyspace(&self) -> &KeySpace {
        &self.inner.keyspace
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        self.strings().get(key).await
    }

    pub async fn set(&self, key: &str, value: &str, seconds: Option<i64>) -> Result<()> {
        self.strings().set(key, value, seconds).await
    }

    pub async fn delete(&self, key: &str) -> Result<i64> {
        self.keys().delete(key).await
    }

    pub async fn expire(&self, key: &str, seconds: i64) -> Result<()> {
        self.keys().expire(key, seconds).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.json().get_json(key).await
    }

    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        seconds: Option<i64>,
    ) -> Result<()> {
        self.json().set_json(key, value, seconds).await
    }
}
