//! Service configuration.
//!
//! Loaded from environment variables (a `.env` file is read first by the
//! binary, if present).
//!
//! ## Environment Variables
//! - `SERVICE_NAME`: name reported in logs (default `profiles`)
//! - `DB_HOST`, `DB_PORT`, `DB_DATABASE`: PostgreSQL location
//! - `DB_USERNAME`, `DB_PASSWORD`: PostgreSQL credentials, never logged
//! - `DB_MAX_CONNECTIONS`: connection pool size (default 5)
//! - `GRPC_PORT`: port the gRPC server listens on
//! - `GRPC_TIMEOUT`: optional per-request timeout in seconds
//! - `LOG_ENV`: `dev`, `prod` or `test` (default `dev`)

use std::{str::FromStr, time::Duration};

use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub service_name: String,
    pub db: DbConfig,
    #[serde(rename = "gRPC")]
    pub grpc: GrpcConfig,
    pub logger: LoggerConfig,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip)]
    pub username: String,
    #[serde(skip)]
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

// Credentials stay out of Debug output as well.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GrpcConfig {
    pub port: u16,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggerConfig {
    pub env: LogEnv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEnv {
    Dev,
    Prod,
    Test,
}

impl FromStr for LogEnv {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(LogEnv::Dev),
            "prod" => Ok(LogEnv::Prod),
            "test" => Ok(LogEnv::Test),
            _ => Err(()),
        }
    }
}

impl Config {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Config {
            service_name: vars
                .optional("SERVICE_NAME")
                .unwrap_or_else(|| "profiles".to_string()),
            db: DbConfig {
                host: vars.required("DB_HOST")?,
                port: vars.parse("DB_PORT")?,
                username: vars.required("DB_USERNAME")?,
                password: vars.required("DB_PASSWORD")?,
                database: vars.required("DB_DATABASE")?,
                max_connections: vars.parse_or("DB_MAX_CONNECTIONS", 5)?,
            },
            grpc: GrpcConfig {
                port: vars.parse("GRPC_PORT")?,
                timeout: vars
                    .optional("GRPC_TIMEOUT")
                    .map(|v| parse_value::<u64>("GRPC_TIMEOUT", v).map(Duration::from_secs))
                    .transpose()?,
            },
            logger: LoggerConfig {
                env: vars.parse_or("LOG_ENV", LogEnv::Dev)?,
            },
        })
    }
}

impl DbConfig {
    /// Connection options for the pool. TLS is not negotiated.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn required(&self, key: &'static str) -> ConfigResult<String> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> ConfigResult<T> {
        parse_value(key, self.required(key)?)
    }

    fn parse_or<T: FromStr>(&self, key: &'static str, default: T) -> ConfigResult<T> {
        match self.optional(key) {
            Some(value) => parse_value(key, value),
            None => Ok(default),
        }
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
