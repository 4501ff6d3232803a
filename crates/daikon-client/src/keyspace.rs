//! Key namespacing
//!
//! Maps logical keys to fully-qualified store keys by prepending a
//! configured header, and strips the header from keys read back from the
//! store. Pure and stateless beyond the configured header.

/// Deterministic logical-key to store-key mapping
#[derive(Clone, Debug, Default)]
pub struct KeySpace {
    header: String,
}

impl KeySpace {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Prepend the header to a logical key
    pub fn with_header(&self, key: &str) -> String {
        format!("{}{}", self.header, key)
    }

    /// Prepend the header to every key of a key-value map
    pub fn with_headers<'a, I>(&self, pairs: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| (self.with_header(key), value.to_string()))
            .collect()
    }

    /// Strip the header from a store key, recovering the logical key.
    ///
    /// Removes the first occurrence of the header substring. Logical keys
    /// must not themselves contain the header, or stripping will corrupt
    /// them.
    pub fn strip_header(&self, key: &str) -> String {
        if self.header.is_empty() {
            return key.to_string();
        }
        key.replacen(&self.header, "", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header() {
        let keyspace = KeySpace::new("app:");
        assert_eq!(keyspace.with_header("user:1"), "app:user:1");

        let empty = KeySpace::default();
        assert_eq!(empty.with_header("user:1"), "user:1");
    }

    #[test]
    fn test_strip_header() {
        let keyspace = KeySpace::new("app:");
        assert_eq!(keyspace.strip_header("app:user:1"), "user:1");
        assert_eq!(keyspace.strip_header("other:user:1"), "other:user:1");

        let empty = KeySpace::default();
        assert_eq!(empty.strip_header("user:1"), "user:1");
    }

    #[test]
    fn test_strip_header_removes_first_occurrence_only() {
        let keyspace = KeySpace::new("app:");
        // Known sharp edge: a logical key containing the header loses that
        // substring too.
        assert_eq!(keyspace.strip_header("app:app:x"), "app:x");
    }

    #[test]
    fn test_with_headers() {
        let keyspace = KeySpace::new("app:");
        let rewritten = keyspace.with_headers(vec![("a", "1"), ("b", "2")]);
        assert_eq!(
            rewritten,
            vec![
                ("app:a".to_string(), "1".to_string()),
                ("app:b".to_string(), "2".to_string()),
            ]
        );
    }
}
