use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted data backend (PostgREST-style API).
    pub backend_url: String,
    /// API key sent with every backend request.
    pub backend_api_key: String,
    /// Secret used to sign admin session tokens.
    pub session_secret: String,
    /// Session lifetime in hours.
    pub session_ttl_hours: i64,
    /// Bucket holding uploaded resumes.
    pub resume_bucket: String,
    /// Upload size ceiling in megabytes.
    pub upload_max_mb: usize,
    /// Default page size for admin listings.
    pub page_size: usize,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            backend_url: get_env("BACKEND_URL")?,
            backend_api_key: get_env("BACKEND_API_KEY")?,
            session_secret: get_env("SESSION_SECRET")?,
            session_ttl_hours: get_env_or("SESSION_TTL_HOURS", 24)?,
            resume_bucket: env::var("RESUME_BUCKET").unwrap_or_else(|_| "cvs".to_string()),
            upload_max_mb: get_env_or("UPLOAD_MAX_MB", 5)?,
            page_size: get_env_or("PAGE_SIZE", 10)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
