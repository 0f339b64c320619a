use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub backend_url: Option<String>,
    pub backend_key: Option<String>,
    pub table: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub sample_delay_ms: u64,
}

/// Everything needed to reach the hosted mentions table.
#[derive(Clone)]
pub struct BackendConfig {
    pub url: String,
    pub key: String,
    pub table: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Live backend settings, or `None` when either the URL or the key is
    /// missing. Callers fall back to the sample dataset in that case.
    #[must_use]
    pub fn backend(&self) -> Option<BackendConfig> {
        match (&self.backend_url, &self.backend_key) {
            (Some(url), Some(key)) => Some(BackendConfig {
                url: url.clone(),
                key: key.clone(),
                table: self.table.clone(),
                request_timeout_secs: self.request_timeout_secs,
            }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend_url", &self.backend_url)
            .field(
                "backend_key",
                &self.backend_key.as_ref().map(|_| "[redacted]"),
            )
            .field("table", &self.table)
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("sample_delay_ms", &self.sample_delay_ms)
            .finish()
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("key", &"[redacted]")
            .field("table", &self.table)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
