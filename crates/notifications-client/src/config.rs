/// Where the notifications backend lives.
///
/// Built once before the first call and owned by the client afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and optional base path, e.g. `http://localhost:8085`.
    pub base_url: String,

    /// Extra path inserted between the base URL and every API path when the
    /// backend sits behind a proxy (e.g. `/api/notifications-backend`).
    pub proxy_prefix: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            proxy_prefix: None,
        }
    }

    pub fn with_proxy_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.proxy_prefix = if prefix.trim_matches('/').is_empty() {
            None
        } else {
            Some(prefix)
        };
        self
    }
}
