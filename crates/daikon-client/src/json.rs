//! JSON convenience helpers
//!
//! Marshal/unmarshal layered over the plain string commands; stored values
//! inherit the string `set` default-expiration policy.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::ClientInner;
use crate::error::Result;
use crate::string::StringCommands;

pub struct JsonCommands {
    inner: Arc<ClientInner>,
}

impl JsonCommands {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn strings(&self) -> StringCommands {
        StringCommands::new(self.inner.clone())
    }

    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        seconds: Option<i64>,
    ) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        self.strings().set(key, &payload, seconds).await
    }

    /// Absent keys are `Ok(None)`; content that cannot be parsed back into
    /// `T` is a `Serialization` error.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.strings().get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
