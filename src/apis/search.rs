use crate::apis::decode::{decode_body, ensure_candidates};
use crate::config::{CredentialPlacement, ResponseFormat, SearchConfig};
use crate::error::{FinderError, Result};
use crate::types::SearchRequest;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Source of raw candidate records for a job description
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Identifier used in logs
    fn client_name(&self) -> &'static str;

    /// Fetch raw candidates. An empty result is `FinderError::NoCandidates`.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>>;
}

/// Search client for the remote ranking endpoint
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    credential: CredentialPlacement,
    format: ResponseFormat,
}

impl HttpSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
            credential: config.credential.clone(),
            format: config.response_format,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.trim().is_empty() {
            self.token = Some(token);
        }
        self
    }

    fn build_request(&self, request: &SearchRequest) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(&self.endpoint).json(request);
        match (&self.token, &self.credential) {
            (Some(token), CredentialPlacement::Query { param }) => {
                builder = builder.query(&[(param.as_str(), token.as_str())]);
            }
            (Some(token), CredentialPlacement::Header) => {
                builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            (None, _) => {
                warn!("No access token configured; sending search without credentials");
            }
        }
        builder
    }
}

#[async_trait::async_trait]
impl SearchClient for HttpSearchClient {
    fn client_name(&self) -> &'static str {
        "http_search"
    }

    #[instrument(skip(self, request), fields(n = request.n))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>> {
        debug!("Posting search request to {}", self.endpoint);
        let response = self.build_request(request).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).trim().to_string();
            warn!(status = status.as_u16(), "Search service rejected request");
            return Err(FinderError::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    message
                },
            });
        }

        let records = ensure_candidates(decode_body(&body, self.format, content_type.as_deref())?)?;
        info!("Search returned {} candidates", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(credential: CredentialPlacement, token: Option<&str>) -> SearchConfig {
        SearchConfig {
            endpoint: "http://localhost:9/api/ai_search".to_string(),
            credential,
            token: token.map(str::to_string),
            ..SearchConfig::default()
        }
    }

    fn request() -> SearchRequest {
        SearchRequest::new("Backend engineer", 3).unwrap()
    }

    #[test]
    fn test_token_in_query() {
        let client = HttpSearchClient::new(&config(CredentialPlacement::default(), Some("s3cret"))).unwrap();
        let built = client.build_request(&request()).build().unwrap();
        assert_eq!(built.url().query(), Some("code=s3cret"));
        assert!(built.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_in_header() {
        let client = HttpSearchClient::new(&config(CredentialPlacement::Header, None))
            .unwrap()
            .with_token("s3cret");
        let built = client.build_request(&request()).build().unwrap();
        assert_eq!(built.headers()[AUTHORIZATION], "Bearer s3cret");
        assert_eq!(built.url().query(), None);
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client = HttpSearchClient::new(&config(CredentialPlacement::default(), Some("  "))).unwrap();
        let built = client.build_request(&request()).build().unwrap();
        assert_eq!(built.url().query(), None);
    }

    #[test]
    fn test_request_body() {
        let client = HttpSearchClient::new(&config(CredentialPlacement::default(), None)).unwrap();
        let built = client.build_request(&request()).build().unwrap();
        let body = built.body().and_then(|b| b.as_bytes()).unwrap();
        let value: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value["job_description"], "Backend engineer");
        assert_eq!(value["n"], 3);
        assert_eq!(built.method(), reqwest::Method::POST);
    }
}
