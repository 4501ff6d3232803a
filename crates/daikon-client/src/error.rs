//! Client error types for the Daikon SDK

/// Error type for Daikon client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("lock '{name}' timed out after {attempts} attempts")]
    LockTimeout { name: String, attempts: u32 },

    #[error("failed to set expiration on key '{key}': {source}")]
    ExpireSet {
        key: String,
        source: Box<ClientError>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::LockTimeout {
            name: "job-42".to_string(),
            attempts: 4,
        };
        assert_eq!(err.to_string(), "lock 'job-42' timed out after 4 attempts");

        let err = ClientError::ExpireSet {
            key: "ns:lock:job-42".to_string(),
            source: Box::new(ClientError::Other(anyhow::anyhow!("connection reset"))),
        };
        assert_eq!(
            err.to_string(),
            "failed to set expiration on key 'ns:lock:job-42': connection reset"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ClientError = parse_err.into();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
