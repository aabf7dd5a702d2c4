//! Blocking HTTP client for the VerbaLingo backend.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::types::{
    SearchFilters, SearchResponse, TranscriptRequest, TranscriptResponse, TranslateResponse,
};
use crate::transcript::Transcript;

/// Operations the rest of the crate needs from the backend.
///
/// Implemented by [`ApiClient`] and by in-memory fakes in tests.
pub trait Backend: Send + Sync {
    /// Search clips for a word.
    fn search(&self, filters: &SearchFilters) -> ApiResult<SearchResponse>;

    /// Fetch the transcript of one video.
    fn transcript(&self, request: &TranscriptRequest) -> ApiResult<Transcript>;

    /// Translate a piece of text.
    fn translate(&self, text: &str, source: &str, target: &str) -> ApiResult<TranslateResponse>;
}

/// HTTP backend client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: "client",
                source,
            })?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    pub fn endpoint_url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        debug!(endpoint, %url, "GET");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        if !status.is_success() {
            warn!(
                endpoint,
                status = status.as_u16(),
                "backend returned error status"
            );
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl Backend for ApiClient {
    fn search(&self, filters: &SearchFilters) -> ApiResult<SearchResponse> {
        let url = self.endpoint_url(&["search"])?;
        let query: Vec<(&str, String)> = filters
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        self.get_json("search", url, &query)
    }

    fn transcript(&self, request: &TranscriptRequest) -> ApiResult<Transcript> {
        let url = self.endpoint_url(&["videos", &request.video_id, "transcript"])?;
        let mut query = vec![("language", request.language.clone())];
        if let Some(center) = request.center_position {
            query.push(("center_position", center.to_string()));
        }
        let response: TranscriptResponse = self.get_json("transcript", url, &query)?;
        Ok(response.into_transcript(request.video_id.clone()))
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> ApiResult<TranslateResponse> {
        let url = self.endpoint_url(&["translate"])?;
        let query = [
            ("text", text.to_string()),
            ("source", source.to_string()),
            ("target", target.to_string()),
        ];
        self.get_json("translate", url, &query)
    }
}
