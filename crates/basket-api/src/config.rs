//! Service configuration.
//!
//! Built once in `main` from an optional YAML file (path in
//! `BASKET_CONFIG_FILE`) and environment variables, which override the file
//! field by field. The resulting `AppConfig` is passed explicitly to whatever
//! needs it.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Environment variable naming the optional YAML configuration file.
pub const CONFIG_FILE_ENV: &str = "BASKET_CONFIG_FILE";

/// Fully resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Upper bound of the connection pool.
    pub database_max_connections: u32,
    /// Base URL of the product service.
    pub product_api_url: String,
    /// Base URL of the stock service.
    pub stock_api_url: String,
    /// Timeout applied to every outbound HTTP call.
    pub http_client_timeout: Duration,
    /// Timeout applied to every inbound request.
    pub request_timeout: Duration,
    /// Remove the written line when the stock reservation fails.
    pub compensate_failed_reservations: bool,
}

/// Shape of the YAML file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    database_max_connections: Option<u32>,
    product_api_url: Option<String>,
    stock_api_url: Option<String>,
    http_client_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    compensate_failed_reservations: Option<bool>,
}

impl AppConfig {
    /// Loads configuration from the process environment and, when
    /// `BASKET_CONFIG_FILE` is set, from that YAML file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or parsed, a
    /// required value is missing, or a value cannot be parsed.
    pub fn load() -> Result<Self, AppError> {
        let yaml = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Some(std::fs::read_to_string(&path).map_err(|e| {
                AppError::Config(format!("could not read config file {path}: {e}"))
            })?),
            Err(_) => None,
        };
        Self::from_sources(yaml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolves configuration from YAML text and an environment lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::load`].
    pub fn from_sources(
        yaml: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let file: FileConfig = match yaml {
            Some(text) => serde_yaml::from_str(text)
                .map_err(|e| AppError::Config(format!("invalid config file: {e}")))?,
            None => FileConfig::default(),
        };

        let host = env("HOST").or(file.host).unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = parsed(&env, "PORT")?.or(file.port).unwrap_or(3000);
        let database_url = required(env("DATABASE_URL").or(file.database_url), "DATABASE_URL")?;
        let database_max_connections = parsed(&env, "DATABASE_MAX_CONNECTIONS")?
            .or(file.database_max_connections)
            .unwrap_or(10);
        let product_api_url =
            required(env("PRODUCT_API_URL").or(file.product_api_url), "PRODUCT_API_URL")?;
        let stock_api_url = required(env("STOCK_API_URL").or(file.stock_api_url), "STOCK_API_URL")?;
        let http_client_timeout_secs = parsed(&env, "HTTP_CLIENT_TIMEOUT_SECS")?
            .or(file.http_client_timeout_secs)
            .unwrap_or(10);
        let request_timeout_secs = parsed(&env, "REQUEST_TIMEOUT_SECS")?
            .or(file.request_timeout_secs)
            .unwrap_or(30);
        let compensate_failed_reservations = parsed(&env, "COMPENSATE_FAILED_RESERVATIONS")?
            .or(file.compensate_failed_reservations)
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            product_api_url,
            stock_api_url,
            http_client_timeout: Duration::from_secs(http_client_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            compensate_failed_reservations,
        })
    }

    /// `host:port` string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(value: Option<String>, key: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("{key} must be set")))
}

fn parsed<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
        })
        .transpose()
}
