//! Daikon Client - namespaced Redis convenience layer
//!
//! This crate provides:
//! - Key namespacing: logical keys are rewritten under a configured header
//! - Typed wrappers for the string/key/list/hash/set/sorted-set families,
//!   with a default expiration applied to mutating commands
//! - JSON marshal/unmarshal helpers over the string commands
//! - MULTI/pipeline batching with key-header rewriting for raw commands
//! - Advisory distributed locks built on atomic INCR, with blocking
//!   acquisition, cancellation, and token-guarded release

pub mod client;
pub mod error;
pub mod hash;
pub mod json;
pub mod key;
pub mod keyspace;
pub mod list;
pub mod lock;
pub mod model;
pub mod options;
pub mod set;
pub mod string;
pub mod transaction;
pub mod zset;

// Facade re-exports
pub use client::DaikonClient;
pub use error::{ClientError, Result};
pub use keyspace::KeySpace;
pub use model::ScanOptions;
pub use options::ClientOptions;
pub use transaction::Command;

// Lock re-exports
pub use lock::{LockManager, LockOptions, LockStore, RedisLockStore};

// Command-group re-exports
pub use hash::HashCommands;
pub use json::JsonCommands;
pub use key::KeyCommands;
pub use list::ListCommands;
pub use set::SetCommands;
pub use string::StringCommands;
pub use transaction::TransactionCommands;
pub use zset::SortedSetCommands;
