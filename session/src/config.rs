//! API endpoint configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";

/// Where the backend API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Join an API path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
