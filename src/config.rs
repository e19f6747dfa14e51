use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 700;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub api_base_url: Url,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub public_rps: u32,
    pub search_debounce: Duration,
    pub request_timeout: Option<Duration>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let search_debounce_ms = match env::var("SEARCH_DEBOUNCE_MS") {
            Ok(_) => get_env_parse::<u64>("SEARCH_DEBOUNCE_MS")?,
            Err(_) => DEFAULT_SEARCH_DEBOUNCE_MS,
        };
        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(_) => Some(Duration::from_secs(get_env_parse("REQUEST_TIMEOUT_SECS")?)),
            Err(_) => None,
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            api_base_url: parse_base_url(&get_env("API_BASE_URL")?)?,
            admin_email: get_env("ADMIN_EMAIL")?,
            admin_password_hash: get_env("ADMIN_PASSWORD_HASH")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            search_debounce: Duration::from_millis(search_debounce_ms),
            request_timeout,
        })
    }
}

/// Endpoint paths are joined onto the base, so it must end with a slash.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized)
        .map_err(|e| Error::Config(format!("Invalid value for API_BASE_URL: {}", e)))
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
