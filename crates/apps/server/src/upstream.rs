use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::error::ApiError;
use crate::payload::SampleSet;

/// Client for another instance's raw-generation endpoint.
#[derive(Clone)]
pub struct Upstream {
    http: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, sample_size: usize) -> String {
        format!("{}/{sample_size}", self.base_url.trim_end_matches('/'))
    }

    /// Fetches `sample_size` raw samples. Transport failures, timeouts, and
    /// non-2xx statuses are `UpstreamUnavailable`; a body that is not a
    /// sample set is `UpstreamDecode`.
    pub async fn fetch(&self, sample_size: usize) -> Result<SampleSet, ApiError> {
        let url = self.url_for(sample_size);
        debug!("fetching samples from {url}");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(&url, &e))?;

        if !resp.status().is_success() {
            return Err(ApiError::UpstreamUnavailable(format!(
                "GET {url} returned {}",
                resp.status()
            )));
        }

        let body: Bytes = resp.bytes().await.map_err(|e| unavailable(&url, &e))?;
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::UpstreamDecode(format!("GET {url}: {e}")))
    }
}

fn unavailable(url: &str, err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::UpstreamUnavailable(format!("GET {url} timed out"))
    } else {
        ApiError::UpstreamUnavailable(format!("GET {url}: {err}"))
    }
}
