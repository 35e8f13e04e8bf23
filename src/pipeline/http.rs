use crate::config::ApiKey;
use crate::pipeline::traits::SearchClient;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Query parameter carrying the claim search credential.
pub const CLAIM_SEARCH_KEY_PARAM: &str = "key";
/// Query parameter carrying the article search credential.
pub const ARTICLE_SEARCH_KEY_PARAM: &str = "apiKey";

/// GET-with-query JSON endpoint. The credential is appended to every request
/// and kept out of error messages.
///
/// Claim search accepts any 2xx status. Article search accepts only
/// `200 OK`; other success codes are treated as failures.
pub struct HttpSearchClient {
    client: Client,
    endpoint: Url,
    key_param: &'static str,
    api_key: ApiKey,
    require_ok: bool,
}

impl HttpSearchClient {
    pub fn new(
        endpoint: Url,
        key_param: &'static str,
        api_key: ApiKey,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("news-verdict/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            key_param,
            api_key,
            require_ok: false,
        })
    }

    pub fn claim_search(endpoint: Url, api_key: ApiKey, timeout: Duration) -> anyhow::Result<Self> {
        Self::new(endpoint, CLAIM_SEARCH_KEY_PARAM, api_key, timeout)
    }

    pub fn article_search(endpoint: Url, api_key: ApiKey, timeout: Duration) -> anyhow::Result<Self> {
        let client = Self::new(endpoint, ARTICLE_SEARCH_KEY_PARAM, api_key, timeout)?;
        Ok(client.requiring_ok())
    }

    /// Rejects every status except `200 OK`.
    pub fn requiring_ok(mut self) -> Self {
        self.require_ok = true;
        self
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, params: &[(&str, String)]) -> anyhow::Result<Value> {
        debug!(endpoint = %self.endpoint, "sending search request");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(params)
            .query(&[(self.key_param, self.api_key.expose())])
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("request to {} failed", self.endpoint))?
            .error_for_status()
            .map_err(|e| e.without_url())
            .with_context(|| format!("{} returned an error status", self.endpoint))?;
        if self.require_ok && response.status() != StatusCode::OK {
            anyhow::bail!("{} returned {} instead of 200", self.endpoint, response.status());
        }
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("{} returned a non-JSON body", self.endpoint))?;
        Ok(body)
    }
}
