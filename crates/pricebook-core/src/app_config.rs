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

impl Environment {
    /// Log filter used when `PRICEBOOK_LOG_LEVEL` is not set.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Rendering-service endpoint used when the static page has no usable
    /// price or image. `None` disables escalation.
    pub render_endpoint: Option<String>,
    pub render_timeout_secs: u64,
}

impl AppConfig {
    /// Returns `true` when a rendering-service endpoint is configured.
    #[must_use]
    pub fn render_enabled(&self) -> bool {
        self.render_endpoint.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Hosted renderers take their API token in the query string.
        let render_endpoint = self
            .render_endpoint
            .as_deref()
            .map(|raw| raw.split_once('?').map_or(raw, |(base, _)| base));

        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("render_endpoint", &render_endpoint)
            .field("render_timeout_secs", &self.render_timeout_secs)
            .finish()
    }
}
