use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub hms_api_url: String,
    pub hms_api_token: Option<String>,
    pub booked_times_cache_ttl_secs: u64,
    pub cache_capacity: usize,
    pub http_timeout_secs: u64,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hms_api_url: String::new(),
            hms_api_token: None,
            booked_times_cache_ttl_secs: 5,
            cache_capacity: 256,
            http_timeout_secs: 10,
            port: 3000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            hms_api_url: env::var("HMS_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("HMS_API_URL not set, using empty value");
                    String::new()
                }),
            hms_api_token: env::var("HMS_API_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
            booked_times_cache_ttl_secs: parse_or_default(
                "BOOKED_TIMES_CACHE_TTL_SECS",
                defaults.booked_times_cache_ttl_secs,
            ),
            cache_capacity: parse_or_default("BACKEND_CACHE_CAPACITY", defaults.cache_capacity),
            http_timeout_secs: parse_or_default("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            port: parse_or_default("PORT", defaults.port),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.hms_api_url.is_empty()
    }

    /// A zero TTL or a zero capacity turns memoization off.
    pub fn is_cache_enabled(&self) -> bool {
        self.booked_times_cache_ttl_secs > 0 && self.cache_capacity > 0
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
