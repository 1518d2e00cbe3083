//! Environment-driven settings for the cached client.

use std::time::Duration;

use rand::Rng;

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com/api";

/// Settings for [`CachedClient`](crate::CachedClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub cache_ttl: Duration,
    /// Minimum spacing between two HTTP requests. The platform allows
    /// roughly one call every two seconds.
    pub min_interval: Duration,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(300),
            min_interval: Duration::from_millis(2000),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Reads `CFSTATS_*` variables, falling back to the defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("CFSTATS_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl: Duration::from_secs(env_u64(
                "CFSTATS_CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
            min_interval: Duration::from_millis(env_u64(
                "CFSTATS_MIN_INTERVAL_MS",
                defaults.min_interval.as_millis() as u64,
            )),
            retry: RetryConfig::from_env(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 2000,
            max_delay_ms: 30000,
        }
    }
}

impl RetryConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("CFSTATS_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("CFSTATS_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("CFSTATS_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// Exponential backoff capped at `max_delay_ms`, with +/-20% jitter.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}
