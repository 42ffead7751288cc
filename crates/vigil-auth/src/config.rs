//! Authentication configuration.

/// Configuration for the request authentication pipeline.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Request header carrying the opaque session token.
    pub session_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_header: "x-vigil-session".into(),
        }
    }
}
