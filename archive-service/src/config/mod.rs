use archive_core::config::{get_env, Environment};
use archive_core::error::AppError;

#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Prefix applied to every persisted slot key so that multiple archive
    /// instances can share one medium without colliding.
    pub namespace: String,
}

impl ArchiveConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env_str = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        let config = ArchiveConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("archive-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            storage: StorageConfig {
                namespace: get_env("STORAGE_NAMESPACE", Some(""), is_prod)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.service_name.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "SERVICE_NAME must not be empty"
            )));
        }

        if self.storage.namespace.contains(char::is_whitespace) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "STORAGE_NAMESPACE must not contain whitespace"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_in_dev() {
        let config = ArchiveConfig::from_env().unwrap();
        assert_eq!(config.service_name, "archive-service");
        assert_eq!(config.storage.namespace, "");
    }

    #[test]
    fn whitespace_namespace_rejected() {
        let config = ArchiveConfig {
            environment: Environment::Dev,
            service_name: "archive-service".to_string(),
            log_level: "info".to_string(),
            storage: StorageConfig {
                namespace: "bad ns".to_string(),
            },
        };
        assert!(config.validate().is_err());
    }
}
