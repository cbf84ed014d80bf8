//! Server configuration

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub log_level: String,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout_ms: u32,
    /// Extra attempts when a new post collides on a unique path
    pub allocation_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_path: "./forum.db".to_string(),
            log_level: "info".to_string(),
            busy_timeout_ms: 5000,
            allocation_retries: 3,
        }
    }
}

impl Config {
    /// Load from environment variables
    ///
    /// Unset or unparsable values fall back to [`Config::default`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("FORUM_SERVER_HOST").unwrap_or(defaults.host);

        let port = std::env::var("FORUM_SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let database_path =
            std::env::var("FORUM_DATABASE_PATH").unwrap_or(defaults.database_path);

        let log_level = std::env::var("FORUM_LOG_LEVEL").unwrap_or(defaults.log_level);

        let busy_timeout_ms = std::env::var("FORUM_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.busy_timeout_ms);

        let allocation_retries = std::env::var("FORUM_ALLOCATION_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.allocation_retries);

        Self {
            host,
            port,
            database_path,
            log_level,
            busy_timeout_ms,
            allocation_retries,
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
