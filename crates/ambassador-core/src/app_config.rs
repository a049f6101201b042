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
    pub env: Environment,
    pub log_level: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub search_base_url: String,
    pub search_client_id: Option<String>,
    pub search_client_secret: Option<String>,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub page_max_retries: u32,
    pub politeness_min_ms: u64,
    pub politeness_max_ms: u64,
    pub competitor_top_n: usize,
    pub analysis_cache_ttl_secs: u64,
    pub history_retention: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("search_base_url", &self.search_base_url)
            .field(
                "search_client_id",
                &self.search_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "search_client_secret",
                &self.search_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .field("page_max_retries", &self.page_max_retries)
            .field("politeness_min_ms", &self.politeness_min_ms)
            .field("politeness_max_ms", &self.politeness_max_ms)
            .field("competitor_top_n", &self.competitor_top_n)
            .field("analysis_cache_ttl_secs", &self.analysis_cache_ttl_secs)
            .field("history_retention", &self.history_retention)
            .finish()
    }
}
