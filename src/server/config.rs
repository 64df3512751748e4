use std::path::PathBuf;

use crate::server::error::{config::ConfigError, AppError};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = ".";
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,
    pub token_ttl_seconds: i64,

    pub bind_address: String,
    /// Directory below which `Images/` is created and served.
    pub upload_dir: PathBuf,

    pub sendgrid_api_key: String,
    pub mail_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let port = optional_parsed("PORT", DEFAULT_PORT)?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_seconds: positive(
                "TOKEN_TTL_SECONDS",
                optional_parsed("TOKEN_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?,
            )?,
            bind_address: format!("0.0.0.0:{}", port),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            sendgrid_api_key: required("SENDGRID_API_KEY")?,
            mail_api_url: SENDGRID_SEND_URL.to_string(),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_parsed<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn positive(name: &str, value: i64) -> Result<i64, ConfigError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        })
    }
}
