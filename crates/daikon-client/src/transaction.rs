//! MULTI/pipeline batching
//!
//! Raw commands are described as argument vectors with declared key
//! positions, so the key header can be applied before the batch is sent.
//! For fully manual batches without header rewriting, build a
//! `redis::Pipeline` directly against `DaikonClient::connection()`.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::error::Result;
use crate::keyspace::KeySpace;

/// A raw command with declared key argument positions.
///
/// `parts[0]` is the command name; `key_indexes` defaults to `[1]` (the
/// common single-key shape). Out-of-range indexes are skipped.
#[derive(Clone, Debug)]
pub struct Command {
    pub parts: Vec<String>,
    pub key_indexes: Option<Vec<usize>>,
}

impl Command {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
            key_indexes: None,
        }
    }

    pub fn with_key_indexes(mut self, key_indexes: Vec<usize>) -> Self {
        self.key_indexes = Some(key_indexes);
        self
    }

    /// Apply the key header at every declared key position
    pub fn rewrite(&self, keyspace: &KeySpace) -> Vec<String> {
        let mut parts = self.parts.clone();
        let indexes = self.key_indexes.as_deref().unwrap_or(&[1]);
        for &index in indexes {
            if index >= parts.len() {
                continue;
            }
            parts[index] = keyspace.with_header(&parts[index]);
        }
        parts
    }
}

pub struct TransactionCommands {
    inner: Arc<ClientInner>,
}

impl TransactionCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn build_pipeline(&self, commands: &[Command], atomic: bool) -> redis::Pipeline {
        let mut pipe = redis::pipe();
        if atomic {
            pipe.atomic();
        }
        for command in commands {
            let parts = command.rewrite(&self.inner.keyspace);
            let Some((name, args)) = parts.split_first() else {
                continue;
            };
            let mut cmd = redis::cmd(name);
            for arg in args {
                cmd.arg(arg);
            }
            pipe.add_command(cmd);
        }
        pipe
    }

    /// Execute the commands inside MULTI/EXEC
    pub async fn exec(&self, commands: &[Command]) -> Result<Vec<redis::Value>> {
        let mut conn = self.inner.connection();
        let results: Vec<redis::Value> = self
            .build_pipeline(commands, true)
            .query_async(&mut conn)
            .await?;
        Ok(results)
    }

    /// Execute the commands as a non-transactional pipeline
    pub async fn pipeline(&self, commands: &[Command]) -> Result<Vec<redis::Value>> {
        let mut conn = self.inner.connection();
        let results: Vec<redis::Value> = self
            .build_pipeline(commands, false)
            .query_async(&mut conn)
            .await?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_default_key_index() {
        let keyspace = KeySpace::new("app:");
        let command = Command::new(["SET", "user:1", "alice"]);
        assert_eq!(command.rewrite(&keyspace), vec!["SET", "app:user:1", "alice"]);
    }

    #[test]
    fn test_rewrite_explicit_key_indexes() {
        let keyspace = KeySpace::new("app:");
        let command =
            Command::new(["RENAME", "a", "b"]).with_key_indexes(vec![1, 2]);
        assert_eq!(command.rewrite(&keyspace), vec!["RENAME", "app:a", "app:b"]);
    }

    #[test]
    fn test_rewrite_skips_out_of_range_indexes() {
        let keyspace = KeySpace::new("app:");
        let command = Command::new(["PING"]).with_key_indexes(vec![5]);
        assert_eq!(command.rewrite(&keyspace), vec!["PING"]);
    }
}
