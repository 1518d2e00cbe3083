//! Caching, spacing and retrying wrapper around the API client.

use std::future::Future;
use std::sync::Mutex;
use std::time::Instant;

use codeforces_api::types::{Contest, RatingChange, Standings, Submission, User};
use codeforces_api::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::MemoryCache;
use crate::config::ClientConfig;
use crate::directory::ContestList;
use crate::error::CfStatsError;
use crate::member::UserData;

/// API client wrapper that adds in-memory caching, request spacing and
/// retries.
///
/// Cache hits bypass the network entirely. On a miss, each request takes
/// the next free slot at least `min_interval` after the previous one, so
/// concurrent fetches are spread out rather than fired together.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
    config: ClientConfig,
    /// Earliest instant the next HTTP request may be sent.
    next_slot: Mutex<Option<Instant>>,
}

impl CachedClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: Client::with_base_url(&config.base_url),
            cache: MemoryCache::new(config.cache_ttl),
            config,
            next_slot: Mutex::new(None),
        }
    }

    async fn rate_limit(&self) {
        let wait = {
            let mut next = self.next_slot.lock().unwrap_or_else(|e| e.into_inner());
            let now = Instant::now();
            let slot = match *next {
                Some(t) if t > now => t,
                _ => now,
            };
            *next = Some(slot + self.config.min_interval);
            slot.saturating_duration_since(now)
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, CfStatsError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CfStatsError>>,
    {
        let cfg = &self.config.retry;
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > cfg.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = cfg.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        cfg.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Serves `key` from the cache, or fetches it with spacing and retries
    /// and caches the result.
    async fn cached<T, F, Fut>(&self, key: String, label: &str, fetch: F) -> Result<T, CfStatsError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, codeforces_api::Error>>,
    {
        if let Some(hit) = self.cache.get_as::<T>(&key)? {
            tracing::debug!("cache hit: {}", key);
            return Ok(hit);
        }

        let value = self
            .with_retry(label, || {
                let request = fetch();
                async move {
                    self.rate_limit().await;
                    Ok::<T, CfStatsError>(request.await?)
                }
            })
            .await?;
        self.cache.put(key, &value);
        Ok(value)
    }

    pub async fn get_user_info(&self, handle: &str) -> Result<User, CfStatsError> {
        self.cached(format!("user.info:{}", handle), "user.info", move || {
            self.inner.get_user_info(handle)
        })
        .await
    }

    pub async fn get_user_status(&self, handle: &str) -> Result<Vec<Submission>, CfStatsError> {
        self.cached(format!("user.status:{}", handle), "user.status", move || {
            self.inner.get_user_status(handle)
        })
        .await
    }

    pub async fn get_user_rating(&self, handle: &str) -> Result<Vec<RatingChange>, CfStatsError> {
        self.cached(format!("user.rating:{}", handle), "user.rating", move || {
            self.inner.get_user_rating(handle)
        })
        .await
    }

    /// Regular or gym contest list, cached for the session like any other call.
    pub async fn get_contest_list(&self, gym: bool) -> Result<Vec<Contest>, CfStatsError> {
        let key = if gym { "contest.list.gym" } else { "contest.list" };
        self.cached(key.to_string(), "contest.list", move || {
            self.inner.get_contest_list(gym)
        })
        .await
    }

    pub async fn get_contest_standings(
        &self,
        contest_id: i64,
        handles: &[String],
        show_unofficial: bool,
    ) -> Result<Standings, CfStatsError> {
        let mut sorted = handles.to_vec();
        sorted.sort();
        let key = format!(
            "contest.standings:{}:{}:{}",
            contest_id,
            sorted.join(";"),
            show_unofficial
        );
        self.cached(key, "contest.standings", move || {
            self.inner
                .get_contest_standings(contest_id, handles, show_unofficial)
        })
        .await
    }

    /// Fetches profile, submissions and rating history of `handle`
    /// concurrently and assembles them under the display name `name`.
    pub async fn get_user(&self, handle: &str, name: &str) -> Result<UserData, CfStatsError> {
        let (info, submissions, rating_changes) = tokio::try_join!(
            self.get_user_info(handle),
            self.get_user_status(handle),
            self.get_user_rating(handle),
        )?;
        tracing::info!(
            "Fetched {}: {} submissions, {} rated contests",
            handle,
            submissions.len(),
            rating_changes.len()
        );
        Ok(UserData::new(name, info, submissions, rating_changes))
    }

    /// Builds the contest directory from the regular and gym contest lists.
    pub async fn get_contest_directory(&self) -> Result<ContestList, CfStatsError> {
        let (regular, gym) =
            tokio::try_join!(self.get_contest_list(false), self.get_contest_list(true))?;
        Ok(regular.into_iter().chain(gym).collect())
    }
}

fn is_retryable(err: &CfStatsError) -> bool {
    match err {
        CfStatsError::Api(api_err) => match api_err {
            codeforces_api::Error::RequestFailed => true,
            codeforces_api::Error::Decode { .. } => false,
            codeforces_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            codeforces_api::Error::Api { comment } => comment.contains("Call limit exceeded"),
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        let transport = CfStatsError::Api(codeforces_api::Error::RequestFailed);
        assert!(is_retryable(&transport));

        let throttled = CfStatsError::Api(codeforces_api::Error::HttpStatus {
            status: 429,
            body: String::new(),
        });
        assert!(is_retryable(&throttled));

        let call_limit = CfStatsError::Api(codeforces_api::Error::Api {
            comment: "Call limit exceeded".to_string(),
        });
        assert!(is_retryable(&call_limit));
    }

    #[test]
    fn permanent_errors() {
        let not_found = CfStatsError::Api(codeforces_api::Error::Api {
            comment: "handle: User with handle x not found".to_string(),
        });
        assert!(!is_retryable(&not_found));

        let bad_request = CfStatsError::Api(codeforces_api::Error::HttpStatus {
            status: 404,
            body: String::new(),
        });
        assert!(!is_retryable(&bad_request));

        let undecodable = CfStatsError::Api(codeforces_api::Error::Decode {
            method: "user.rating".to_string(),
            snippet: "{}".to_string(),
        });
        assert!(!is_retryable(&undecodable));

        assert!(!is_retryable(&CfStatsError::InvalidInput("x".to_string())));
    }
}
