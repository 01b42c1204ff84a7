//! API configuration

use core_kernel::CoreError;
use domain_customer::ViaCepConfig;
use infra_db::DatabaseConfig;
use serde::Deserialize;
use std::time::Duration;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Base URL of the ViaCEP service, without the postal code segment
    pub viacep_base_url: String,
    /// Timeout for a single ViaCEP request
    pub viacep_timeout_secs: u64,
    /// Maximum number of pooled database connections
    pub db_max_connections: u32,
    /// Minimum number of pooled database connections
    pub db_min_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let viacep = ViaCepConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/customer_registry".to_string(),
            log_level: "info".to_string(),
            viacep_base_url: viacep.base_url,
            viacep_timeout_secs: viacep.timeout_secs,
            db_max_connections: 10,
            db_min_connections: 2,
            db_acquire_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Variables that are not set keep their default value.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("viacep_base_url", defaults.viacep_base_url)?
            .set_default("viacep_timeout_secs", defaults.viacep_timeout_secs)?
            .set_default("db_max_connections", defaults.db_max_connections)?
            .set_default("db_min_connections", defaults.db_min_connections)?
            .set_default("db_acquire_timeout_secs", defaults.db_acquire_timeout_secs)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Rejects values the server cannot start with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.database_url.trim().is_empty() {
            return Err(CoreError::configuration("database_url must not be empty"));
        }
        if self.viacep_timeout_secs == 0 {
            return Err(CoreError::configuration("viacep_timeout_secs must be positive"));
        }
        if self.db_acquire_timeout_secs == 0 {
            return Err(CoreError::configuration("db_acquire_timeout_secs must be positive"));
        }
        if self.db_min_connections > self.db_max_connections {
            return Err(CoreError::configuration(format!(
                "db_min_connections ({}) exceeds db_max_connections ({})",
                self.db_min_connections, self.db_max_connections
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection pool settings
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone())
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }

    /// Address lookup client settings
    pub fn viacep_config(&self) -> ViaCepConfig {
        ViaCepConfig {
            base_url: self.viacep_base_url.clone(),
            timeout_secs: self.viacep_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.viacep_base_url, "https://viacep.com.br/ws");
    }

    #[test]
    fn test_inverted_pool_sizes_are_rejected() {
        let config = ApiConfig {
            db_min_connections: 20,
            db_max_connections: 5,
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = ApiConfig {
            viacep_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            db_acquire_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_derived_configs_carry_values() {
        let config = ApiConfig {
            viacep_base_url: "http://localhost:9000/ws".to_string(),
            db_max_connections: 7,
            ..ApiConfig::default()
        };

        assert_eq!(config.viacep_config().base_url, "http://localhost:9000/ws");
        assert_eq!(config.database_config().max_connections, 7);
        assert_eq!(config.viacep_config().timeout_secs, 10);
    }

    #[test]
    fn test_database_config_carries_pool_settings() {
        let config = ApiConfig {
            database_url: "postgres://db/registry".to_string(),
            db_max_connections: 12,
            db_min_connections: 3,
            db_acquire_timeout_secs: 4,
            ..ApiConfig::default()
        };

        assert_eq!(
            config.database_config(),
            DatabaseConfig::new("postgres://db/registry")
                .max_connections(12)
                .min_connections(3)
                .acquire_timeout(Duration::from_secs(4))
        );
    }
}
