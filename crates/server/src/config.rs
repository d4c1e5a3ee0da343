use log::info;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Settings read from the environment (and `.env`, if present) at start-up
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub oidc_issuer_url: String,
    /// Token subjects that register with the admin role
    pub admin_subjects: Vec<String>,
    pub request_timeout: Duration,
    pub run_migrations: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("PORT", "5000")?,
            database_url: required("DATABASE_URL")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            admin_subjects: parse_list(&env::var("ADMIN_SUBJECTS").unwrap_or_default()),
            request_timeout: Duration::from_secs(try_load("REQUEST_TIMEOUT_SECS", "30")?),
            run_migrations: try_load("RUN_MIGRATIONS", "true")?,
        })
    }

    pub fn is_admin_subject(&self, subject: &str) -> bool {
        self.admin_subjects.iter().any(|s| s == subject)
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        })
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
