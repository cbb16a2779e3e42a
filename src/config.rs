use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub neo_feed_url: String,
    pub nasa_key: String,
    pub http_timeout: Duration,
    pub date_validation: DateValidation,
}

/// How strictly inbound date fields are checked. Strict requires the
/// YYYY-MM-DD pattern; lenient only requires a non-empty value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateValidation {
    Strict,
    Lenient,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let neo_feed_url = std::env::var("NEO_FEED_URL")
            .unwrap_or_else(|_| "https://api.nasa.gov/neo/rest/v1/feed".to_string());

        let nasa_key = std::env::var("NASA_API_KEY").unwrap_or_default();

        let http_timeout = Duration::from_secs(env_u64("HTTP_TIMEOUT_SECONDS", 30));

        let date_validation = match std::env::var("DATE_VALIDATION") {
            Ok(v) if v.eq_ignore_ascii_case("lenient") => DateValidation::Lenient,
            _ => DateValidation::Strict,
        };

        Self {
            port,
            neo_feed_url,
            nasa_key,
            http_timeout,
            date_validation,
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
