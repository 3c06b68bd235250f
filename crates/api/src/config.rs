use std::fmt::Display;
use std::str::FromStr;

use crate::auth::token::TokenConfig;

const DEFAULT_PORT: u16 = 3003;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after SIGINT/SIGTERM.
    pub shutdown_timeout_secs: u64,
    pub token: TokenConfig,
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3003`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `TOKEN_SECRET`          | required                |
    ///
    /// Panics on a value that does not parse; a bad deployment should not
    /// start.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed_var("PORT", DEFAULT_PORT),
            cors_origins: origin_list(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into()),
            ),
            request_timeout_secs: parsed_var("REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            shutdown_timeout_secs: parsed_var("SHUTDOWN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            token: TokenConfig::from_env(),
        }
    }
}

fn parsed_var<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
