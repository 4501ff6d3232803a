//! Client configuration
//!
//! All configuration is constructor-supplied; defaults are applied for any
//! field the caller leaves untouched. There is no environment or flag
//! parsing.

use std::time::Duration;

/// Configuration for the Daikon client
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Header prepended to every logical key
    pub key_header: String,
    /// Default expiration, in seconds, applied to mutating commands when the
    /// caller supplies none; zero or negative means "never expire"
    pub default_expire_time: i64,
    /// Default wall-clock budget for blocking operations that specify none
    pub default_timeout: Duration,
    /// Propagate EXPIRE failures instead of swallowing them
    pub throw_expire_error: bool,
    /// Retry cap for blocking lock acquisition when no budget is given
    pub default_retry_times: u32,
    /// Delay between lock acquisition retries
    pub default_retry_delay: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            key_header: String::new(),
            default_expire_time: 600,
            default_timeout: Duration::from_secs(600),
            throw_expire_error: false,
            default_retry_times: 250,
            default_retry_delay: Duration::from_secs(2),
        }
    }
}

impl ClientOptions {
    /// Create options with a key header and defaults for everything else
    pub fn new(key_header: &str) -> Self {
        Self {
            key_header: key_header.to_string(),
            ..Default::default()
        }
    }

    /// Set the key header
    pub fn with_key_header(mut self, key_header: &str) -> Self {
        self.key_header = key_header.to_string();
        self
    }

    /// Set the default expiration in seconds (zero or negative disables it)
    pub fn with_default_expire_time(mut self, seconds: i64) -> Self {
        self.default_expire_time = seconds;
        self
    }

    /// Set the default wall-clock budget for blocking operations
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Propagate EXPIRE failures instead of swallowing them
    pub fn with_throw_expire_error(mut self, throw_expire_error: bool) -> Self {
        self.throw_expire_error = throw_expire_error;
        self
    }

    /// Set the retry cap used when a blocking acquire has no explicit budget
    pub fn with_default_retry_times(mut self, times: u32) -> Self {
        self.default_retry_times = times;
        self
    }

    /// Set the delay between lock acquisition retries
    pub fn with_default_retry_delay(mut self, delay: Duration) -> Self {
        self.default_retry_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = ClientOptions::default();
        assert_eq!(options.key_header, "");
        assert_eq!(options.default_expire_time, 600);
        assert_eq!(options.default_timeout, Duration::from_secs(600));
        assert!(!options.throw_expire_error);
        assert_eq!(options.default_retry_times, 250);
        assert_eq!(options.default_retry_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_options_builder() {
        let options = ClientOptions::new("app:")
            .with_default_expire_time(-1)
            .with_default_timeout(Duration::from_secs(30))
            .with_throw_expire_error(true)
            .with_default_retry_times(5)
            .with_default_retry_delay(Duration::from_millis(100));

        assert_eq!(options.key_header, "app:");
        assert_eq!(options.default_expire_time, -1);
        assert_eq!(options.default_timeout, Duration::from_secs(30));
        assert!(options.throw_expire_error);
        assert_eq!(options.default_retry_times, 5);
        assert_eq!(options.default_retry_delay, Duration::from_millis(100));
    }
}
