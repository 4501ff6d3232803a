//! Shared request option types

/// Options for incremental SCAN-family commands (SSCAN, ZSCAN)
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Glob-style pattern applied server-side (MATCH)
    pub pattern: Option<String>,
    /// Hint for the number of elements returned per call (COUNT)
    pub count: Option<u64>,
}

impl ScanOptions {
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}
