use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_PORT, DEFAULT_RECENT_WINDOW, DEFAULT_TOKEN_TTL_HOURS};
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub bcrypt_cost: u32,
    pub recent_window: usize,
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("recent_window", &self.recent_window)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: parsed("PORT").unwrap_or(DEFAULT_PORT),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "change-this-in-production".to_string()),
            jwt_expires_in: Duration::from_secs(
                parsed::<u64>("JWT_EXPIRES_IN_HOURS").unwrap_or(DEFAULT_TOKEN_TTL_HOURS) * 3600,
            ),
            bcrypt_cost: parsed("BCRYPT_COST").unwrap_or(bcrypt::DEFAULT_COST),
            recent_window: parsed("RECENT_WINDOW").unwrap_or(DEFAULT_RECENT_WINDOW),
            cache_ttl: Duration::from_secs(parsed("CACHE_TTL_SECS").unwrap_or(DEFAULT_CACHE_TTL_SECS)),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
