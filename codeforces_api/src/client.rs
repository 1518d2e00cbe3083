//! HTTP client for the Codeforces public API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    types::{ApiResponse, ApiStatus, Contest, RatingChange, Standings, Submission, User},
    Error,
};

/// HTTP client for the Codeforces public API.
///
/// Only anonymous methods are used, so no API key or signature is sent.
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
pub struct Client {
    /// Base URL for the API. Defaults to `https://codeforces.com/api`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://codeforces.com/api".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, method: &str, params: &[(&str, String)]) -> Result<Url, Error> {
        let mut url = Url::parse(format!("{}/{}", &self.base_api_url, method).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get<T>(&self, method: &str, params: &[(&str, String)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(method, params)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {}: {}", method, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            // The API reports bad handles and call limits as 400 with a FAILED envelope.
            if let Some(comment) = failed_comment(&body) {
                tracing::error!("{} failed with status {}: {}", method, status, comment);
                return Err(Error::Api { comment });
            }
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<ApiResponse<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {}: {} | body: {}", method, e, snippet);
            Error::Decode {
                method: method.to_string(),
                snippet,
            }
        })?;

        match (parsed.status, parsed.result) {
            (ApiStatus::Ok, Some(result)) => Ok(result),
            (ApiStatus::Ok, None) => {
                tracing::error!("{} returned OK without a result", method);
                Err(Error::Decode {
                    method: method.to_string(),
                    snippet: truncate_body(&body),
                })
            }
            (ApiStatus::Failed, _) => Err(Error::Api {
                comment: parsed.comment.unwrap_or_default(),
            }),
        }
    }

    /// Fetches the profile of a single handle.
    pub async fn get_user_info(&self, handle: &str) -> Result<User, Error> {
        let users = self
            .get::<Vec<User>>("user.info", &[("handles", handle.to_string())])
            .await?;
        users.into_iter().next().ok_or_else(|| {
            tracing::error!("user.info returned no profile for {}", handle);
            Error::Decode {
                method: "user.info".to_string(),
                snippet: "empty result".to_string(),
            }
        })
    }

    /// Fetches every submission of a handle, newest first.
    pub async fn get_user_status(&self, handle: &str) -> Result<Vec<Submission>, Error> {
        self.get("user.status", &[("handle", handle.to_string())])
            .await
    }

    /// Fetches the rated-contest history of a handle.
    pub async fn get_user_rating(&self, handle: &str) -> Result<Vec<RatingChange>, Error> {
        self.get("user.rating", &[("handle", handle.to_string())])
            .await
    }

    /// Fetches all regular contests, or all gym contests when `gym` is set.
    pub async fn get_contest_list(&self, gym: bool) -> Result<Vec<Contest>, Error> {
        let params = if gym {
            vec![("gym", "true".to_string())]
        } else {
            Vec::new()
        };
        self.get("contest.list", &params).await
    }

    /// Fetches the standings rows of `handles` in one contest.
    pub async fn get_contest_standings(
        &self,
        contest_id: i64,
        handles: &[String],
        show_unofficial: bool,
    ) -> Result<Standings, Error> {
        let mut params = vec![
            ("contestId", contest_id.to_string()),
            ("handles", handles.join(";")),
        ];
        if show_unofficial {
            params.push(("showUnofficial", "true".to_string()));
        }
        self.get("contest.standings", &params).await
    }
}

fn failed_comment(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<ApiResponse<serde_json::Value>>(body).ok()?;
    match envelope.status {
        ApiStatus::Failed => Some(envelope.comment.unwrap_or_default()),
        ApiStatus::Ok => None,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_method_and_params() {
        let client = Client::with_base_url("http://localhost:1234/api/");
        let url = client
            .get_url(
                "contest.standings",
                &[("contestId", "1520".to_string()), ("handles", "a;b".to_string())],
            )
            .unwrap();
        assert_eq!(url.path(), "/api/contest.standings");
        assert_eq!(url.query(), Some("contestId=1520&handles=a%3Bb"));
    }

    #[test]
    fn url_without_params_has_no_query() {
        let client = Client::new();
        let url = client.get_url("contest.list", &[]).unwrap();
        assert_eq!(url.as_str(), "https://codeforces.com/api/contest.list");
    }

    #[test]
    fn failed_comment_extracted() {
        let body = r#"{"status":"FAILED","comment":"handle: User with handle nobody not found"}"#;
        assert_eq!(
            failed_comment(body).as_deref(),
            Some("handle: User with handle nobody not found")
        );
        assert_eq!(failed_comment("<html>Bad gateway</html>"), None);
        assert_eq!(failed_comment(r#"{"status":"OK","result":[]}"#), None);
    }

    #[test]
    fn truncate_long_body() {
        let body = "x".repeat(2500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }
}
