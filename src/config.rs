use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SITE_URL: &str = "https://github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_url: String,
    pub site_url: String,
    pub max_concurrent_pages: Option<usize>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = lookup("GITHUB_ACCESS_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let api_url = lookup("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let site_url = lookup("GITHUB_SITE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

        let max_concurrent_pages = lookup("MAX_CONCURRENT_PAGES")
            .map(|v| parse_positive("MAX_CONCURRENT_PAGES", &v))
            .transpose()?
            .map(|n| n as usize);

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .map(|v| parse_positive("REQUEST_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            github_token,
            api_url,
            site_url,
            max_concurrent_pages,
            request_timeout,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            max_concurrent_pages: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got {:?}",
            key, value
        ))),
    }
}

/// The part of the configuration the route handler reads.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub site_url: String,
    pub max_concurrent_pages: Option<usize>,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            site_url: config.site_url.clone(),
            max_concurrent_pages: config.max_concurrent_pages,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
