//! API configuration
//!
//! Server settings come from `API_*` environment variables, submission rules
//! from `CLAIMS__*` (for example `CLAIMS__MAX_HOURS=160` or
//! `CLAIMS__DOCUMENTS__ALLOWED_EXTENSIONS=.pdf,.docx`). Anything unset keeps
//! its default.

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use domain_claims::ClaimRules;
use infra_db::DatabaseConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub database_connect_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Directory supporting documents are written to
    pub upload_dir: String,
    /// Public path prefix of stored documents
    pub upload_url_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/lecturer_claims".to_string(),
            database_max_connections: 10,
            database_connect_timeout_secs: 30,
            log_level: "info".to_string(),
            upload_dir: "wwwroot/uploads".to_string(),
            upload_url_prefix: "/uploads".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the `API_` environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("API"))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for `infra_db::create_pool`
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.database_max_connections)
            .connect_timeout(Duration::from_secs(self.database_connect_timeout_secs))
    }
}

/// Loads the submission rules from the `CLAIMS__` environment
pub fn load_claim_rules() -> Result<ClaimRules, ConfigError> {
    claim_rules_from(claims_environment())
}

fn claims_environment() -> Environment {
    Environment::with_prefix("CLAIMS")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("documents.allowed_extensions")
        .try_parsing(true)
}

fn claim_rules_from(env: Environment) -> Result<ClaimRules, ConfigError> {
    Config::builder().add_source(env).build()?.try_deserialize()
}
