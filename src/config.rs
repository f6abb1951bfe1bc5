use std::env;
use std::time::Duration;
use crate::domain::services::media::DEFAULT_MAX_IMAGE_BYTES;

pub const DEFAULT_DRAFT_CACHE_KEY: &str = "digievent:event-request-draft";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String, // "memory" or a sqlite:// URL
    pub port: u16,
    pub autosave_delay: Duration,
    pub draft_cache_key: String,
    pub session_ttl: Duration,
    pub max_image_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "memory".to_string(),
            port: 3000,
            autosave_delay: Duration::from_millis(1000),
            draft_cache_key: DEFAULT_DRAFT_CACHE_KEY.to_string(),
            session_ttl: Duration::from_secs(30 * 60),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            port: parse_var("PORT").unwrap_or(defaults.port),
            autosave_delay: parse_var("AUTOSAVE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.autosave_delay),
            draft_cache_key: env::var("DRAFT_CACHE_KEY").unwrap_or(defaults.draft_cache_key),
            session_ttl: parse_var("SESSION_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            max_image_bytes: parse_var("MAX_IMAGE_BYTES").unwrap_or(defaults.max_image_bytes),
        }
    }

    pub fn uses_sqlite(&self) -> bool {
        self.database_url.starts_with("sqlite:")
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.trim().parse().ok())
}
