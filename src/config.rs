use std::{env, fmt::Display, str::FromStr};

use leptos::logging::{log, warn};
use thiserror::Error;

const DEV_JWT_SECRET: &str = "taco-tuesday-development-secret-change-me";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application settings read from the environment. The site address and asset
/// paths live in `[package.metadata.leptos]` instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let jwt_secret = var("TACO_JWT_SECRET").unwrap_or_else(|| {
            warn!("[CONFIG] TACO_JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        Ok(Self {
            database_path: try_load("TACO_DATABASE_PATH", "taco_tuesday.db")?,
            jwt_secret,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            log!("[CONFIG] {key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}
