use std::env;
use std::path::Path;

use thiserror::Error;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DASHBOARD_URL: &str =
    "https://myiot9876.grafana.net/public-dashboards/0d7c298e08364c00a8e1906349c06df1";
pub const DASHBOARD_URL_ENV: &str = "ANALYTICS_DASHBOARD_URL";
pub const SESSION_COOKIE: &str = "session_id";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 8 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ANALYTICS_DASHBOARD_URL must be an http(s) URL, got '{0}'")]
    InvalidDashboardUrl(String),

    #[error("Failed to read stylesheet at {path}: {source}")]
    Stylesheet {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Analytics dashboard link, falling back to the built-in Grafana board.
pub fn get_dashboard_url() -> String {
    sanitize_dashboard_url(&env::var(DASHBOARD_URL_ENV).unwrap_or_default())
}

pub fn sanitize_dashboard_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_DASHBOARD_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn validate_dashboard_url(url: &str) -> Result<(), ConfigError> {
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidDashboardUrl(url.to_string())),
    }
}

pub fn read_stylesheet(path: &str) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Stylesheet {
        path: path.to_string(),
        source,
    })
}
