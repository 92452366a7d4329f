use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Retention window for wishlists when `LIST_TTL_DAYS` is unset.
pub const DEFAULT_LIST_TTL_DAYS: u64 = 45;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    pub list_ttl_days: u64,
    /// CORS origins; any origin is allowed when empty.
    pub allowed_origins: Vec<String>,
    /// Skip the private-network checks on scraped URLs (local development only).
    pub scrape_allow_private_hosts: bool,
    pub scrape_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            list_ttl_days: env::var("LIST_TTL_DAYS")
                .unwrap_or_else(|_| DEFAULT_LIST_TTL_DAYS.to_string())
                .parse()
                .context("LIST_TTL_DAYS must be a whole number of days")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|s| parse_list(&s))
                .unwrap_or_default(),
            scrape_allow_private_hosts: env::var("SCRAPE_ALLOW_PRIVATE_HOSTS")
                .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            scrape_timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .ok()
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("SCRAPE_TIMEOUT_SECS must be a number of seconds")?,
        })
    }

    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_days * 24 * 60 * 60)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
