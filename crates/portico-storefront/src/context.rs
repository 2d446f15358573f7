//! Request context.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Unique request identifier, for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new request id.
    pub fn generate() -> Self {
        let bytes: [u8; 12] = rand::thread_rng().gen();
        Self(format!("req_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Create from an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host request the pipeline runs under.
///
/// Built once per inbound request by the host integration. The mount path
/// scopes generated links (the logout redirect) to the active site mount.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request identifier.
    pub request_id: RequestId,
    /// Request path.
    pub path: String,
    /// The active site mount's path prefix, e.g. "/shop".
    pub mount_path: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl RequestContext {
    /// Create a context for a request path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::generate(),
            path: path.into(),
            mount_path: String::new(),
            headers: HashMap::new(),
        }
    }

    /// Set the site mount path.
    pub fn with_mount(mut self, mount_path: impl Into<String>) -> Self {
        self.mount_path = mount_path.into();
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::generate(), RequestId::generate());
        assert!(RequestId::generate().as_str().starts_with("req_"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let ctx = RequestContext::new("/cart").with_header("X-Store", "store1");
        assert_eq!(ctx.header("x-store"), Some("store1"));
        assert_eq!(ctx.header("missing"), None);
    }
}
