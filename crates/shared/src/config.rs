//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Disbursement engine configuration.
    pub engine: EngineConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Disbursement engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How many times a mutating operation is retried after a
    /// serialization conflict before surfacing the error.
    #[serde(default = "default_max_commit_retries")]
    pub max_commit_retries: u32,
    /// The fixed payee for developer revenue-share disbursements.
    /// Client-supplied recipients are never honored for that category.
    pub developer_payee: DeveloperPayee,
}

fn default_max_commit_retries() -> u32 {
    3
}

/// Bank details of the developer revenue-share payee.
#[derive(Debug, Clone, Deserialize)]
pub struct DeveloperPayee {
    /// Display name of the payee.
    pub name: String,
    /// Contact (phone or email), if any.
    #[serde(default)]
    pub contact: Option<String>,
    /// Bank name.
    pub bank_name: String,
    /// Bank account number.
    pub bank_account: String,
    /// Name the bank account is held under.
    pub bank_account_name: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AMANAH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    const MINIMAL: &str = r#"
        [server]

        [database]
        url = "postgres://localhost/amanah_test"

        [engine.developer_payee]
        name = "Amanah Developer"
        bank_name = "BCA"
        bank_account = "1234567890"
        bank_account_name = "PT Amanah Digital"
    "#;

    fn load_from(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .expect("config builds")
            .try_deserialize()
            .expect("config deserializes")
    }

    #[test]
    fn test_defaults_applied() {
        let config = load_from(MINIMAL);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.engine.max_commit_retries, 3);
        assert_eq!(config.engine.developer_payee.contact, None);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/amanah_test"
            max_connections = 5

            [engine]
            max_commit_retries = 7

            [engine.developer_payee]
            name = "Amanah Developer"
            contact = "dev@amanah.example"
            bank_name = "BCA"
            bank_account = "1234567890"
            bank_account_name = "PT Amanah Digital"
        "#;
        let config = load_from(toml);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.engine.max_commit_retries, 7);
        assert_eq!(
            config.engine.developer_payee.contact.as_deref(),
            Some("dev@amanah.example")
        );
    }
}
