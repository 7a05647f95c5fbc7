//! HTTP client for the LTA DataMall carpark availability feed.
//!
//! Every request carries the `AccountKey` header DataMall authenticates with.
//! The feed is paged: each call returns at most [`PAGE_SIZE`] entries and the
//! next page is requested with `$skip`.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::DatamallError;

/// Entries DataMall returns per call.
pub const PAGE_SIZE: usize = 500;

/// Guard against an upstream that never returns a short page.
const MAX_PAGES: usize = 100;

/// Client for the `CarParkAvailabilityv2` endpoint.
///
/// The feed URL comes from configuration so tests can point the client at
/// a mock server.
pub struct DatamallClient {
    client: Client,
    account_key: String,
    feed_url: Url,
}

impl std::fmt::Debug for DatamallClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatamallClient")
            .field("feed_url", &self.feed_url.as_str())
            .field("account_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl DatamallClient {
    /// Creates a client for `feed_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DatamallError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`DatamallError::InvalidFeedUrl`] if `feed_url` does not
    /// parse.
    pub fn with_feed_url(
        account_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        feed_url: &str,
    ) -> Result<Self, DatamallError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(feed_url).map_err(|e| DatamallError::InvalidFeedUrl {
            url: feed_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            account_key: account_key.to_owned(),
            feed_url: parsed,
        })
    }

    #[must_use]
    pub fn feed_url(&self) -> &str {
        self.feed_url.as_str()
    }

    /// Fetches the first page of the feed and returns the JSON untouched.
    ///
    /// # Errors
    ///
    /// - [`DatamallError::UpstreamStatus`] for a non-2xx response.
    /// - [`DatamallError::Http`] on network failure or timeout.
    /// - [`DatamallError::Deserialize`] if the body is not JSON.
    pub async fn fetch_raw(&self) -> Result<Value, DatamallError> {
        self.request_json(&self.page_url(0)).await
    }

    /// Fetches every page and merges them into one `{"value": [...]}`
    /// envelope.
    ///
    /// All-or-nothing: a failure on any page discards the pages already
    /// fetched.
    ///
    /// # Errors
    ///
    /// Propagates request errors, returns [`DatamallError::Deserialize`] if a
    /// page has no `value` array, and [`DatamallError::PaginationLimit`] if
    /// the feed does not end within the page limit.
    pub async fn fetch_all(&self) -> Result<Value, DatamallError> {
        let mut entries: Vec<Value> = Vec::new();

        for page in 0..MAX_PAGES {
            let skip = page * PAGE_SIZE;
            let mut body = self.request_json(&self.page_url(skip)).await?;
            let batch: Vec<Value> =
                serde_json::from_value(body.get_mut("value").map_or(Value::Null, Value::take))
                    .map_err(|e| DatamallError::Deserialize {
                        context: format!("feed page at $skip={skip}"),
                        source: e,
                    })?;

            let batch_len = batch.len();
            entries.extend(batch);
            tracing::debug!(page, batch_len, total = entries.len(), "fetched DataMall page");

            if batch_len < PAGE_SIZE {
                return Ok(serde_json::json!({ "value": entries }));
            }
        }

        Err(DatamallError::PaginationLimit {
            max_pages: MAX_PAGES,
        })
    }

    /// The feed URL with `$skip` appended for every page but the first.
    fn page_url(&self, skip: usize) -> Url {
        let mut url = self.feed_url.clone();
        if skip > 0 {
            url.query_pairs_mut()
                .append_pair("$skip", &skip.to_string());
        }
        url
    }

    async fn request_json(&self, url: &Url) -> Result<Value, DatamallError> {
        let response = self
            .client
            .get(url.clone())
            .header("AccountKey", &self.account_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "DataMall request failed");
            return Err(DatamallError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DatamallError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
