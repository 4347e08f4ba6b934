use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Items table name (default: "ItemsTable")
    pub items_table_name: String,
    /// URL requested by the connectivity check (default: "http://www.google.com/")
    pub connectivity_url: String,
    /// Connectivity check timeout in seconds (default: 10)
    pub connectivity_timeout_secs: u64,
    /// Per-request timeout applied to every route in seconds (default: 30)
    pub request_timeout_secs: u64,
    /// PostgreSQL host for the RLS demo
    pub db_host: Option<String>,
    /// PostgreSQL port (default: 5432)
    pub db_port: u16,
    /// Secrets Manager secret holding `dbname`, `username` and `password`
    pub db_secret_name: Option<String>,
    /// AWS region override
    pub aws_region: Option<String>,
    /// Custom AWS endpoint (e.g. local DynamoDB)
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub aws_endpoint_url: Option<String>,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ITEMS_TABLE_NAME` - Items table name (default: "ItemsTable")
    /// - `CONNECTIVITY_URL` - Target URL (default: "http://www.google.com/")
    /// - `CONNECTIVITY_TIMEOUT_SECS` - Request timeout (default: 10)
    /// - `REQUEST_TIMEOUT_SECS` - Route timeout (default: 30)
    /// - `DB_HOST` - PostgreSQL host (no default)
    /// - `DB_PORT` - PostgreSQL port (default: 5432)
    /// - `DB_SECRET_NAME` - Database credentials secret (no default)
    /// - `AWS_REGION` - AWS region (SDK default chain when unset)
    /// - `AWS_ENDPOINT_URL` - Custom AWS endpoint (no default)
    /// - `LOG_FORMAT` - `json` for JSON log lines (default: text)
    pub fn from_env() -> Self {
        Self {
            items_table_name: env::var("ITEMS_TABLE_NAME")
                .unwrap_or_else(|_| "ItemsTable".to_string()),
            connectivity_url: env::var("CONNECTIVITY_URL")
                .unwrap_or_else(|_| "http://www.google.com/".to_string()),
            connectivity_timeout_secs: env::var("CONNECTIVITY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            db_host: non_empty_var("DB_HOST"),
            db_port: env::var("DB_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5432),
            db_secret_name: non_empty_var("DB_SECRET_NAME"),
            aws_region: non_empty_var("AWS_REGION"),
            aws_endpoint_url: non_empty_var("AWS_ENDPOINT_URL"),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Get the connectivity check timeout as a Duration.
    pub fn connectivity_timeout(&self) -> Duration {
        Duration::from_secs(self.connectivity_timeout_secs)
    }

    /// Get the route timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_conversion() {
        let config = Config {
            items_table_name: "ItemsTable".to_string(),
            connectivity_url: "http://localhost/".to_string(),
            connectivity_timeout_secs: 3,
            request_timeout_secs: 45,
            db_host: None,
            db_port: 5432,
            db_secret_name: None,
            aws_region: None,
            aws_endpoint_url: None,
            log_json: false,
        };

        assert_eq!(config.connectivity_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), Duration::from_secs(45));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("ITEMS_TABLE_NAME");
        env::remove_var("CONNECTIVITY_URL");
        env::remove_var("CONNECTIVITY_TIMEOUT_SECS");
        env::remove_var("REQUEST_TIMEOUT_SECS");
        env::remove_var("DB_HOST");
        env::remove_var("DB_PORT");
        env::remove_var("DB_SECRET_NAME");
        env::remove_var("LOG_FORMAT");

        let config = Config::from_env();

        assert_eq!(config.items_table_name, "ItemsTable");
        assert_eq!(config.connectivity_url, "http://www.google.com/");
        assert_eq!(config.connectivity_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.db_host, None);
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.db_secret_name, None);
        assert!(!config.log_json);
    }
}
