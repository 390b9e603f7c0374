//! HTTP implementation of [`SearchBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};

use super::{ClientError, ClientResult, ProbePayload, SearchBackend, SearchRequest};
use crate::config::ServiceConfig;
use crate::types::ResultItem;

/// Longest response body excerpt kept in a status error.
const ERROR_BODY_EXCERPT: usize = 200;

/// Multipart POST client for the search endpoint.
pub struct HttpSearchClient {
    http: Client,
    endpoint: String,
}

impl HttpSearchClient {
    /// Create a client with a timeout taken from the configuration.
    pub fn new(config: &ServiceConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: &ServiceConfig, http: Client) -> Self {
        Self {
            http,
            endpoint: config.endpoint_url(),
        }
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(request: SearchRequest) -> ClientResult<Form> {
        let form = match request.probe {
            ProbePayload::File {
                file_name,
                mime_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime_type)
                    .map_err(|e| ClientError::Request(e.to_string()))?;
                Form::new().part("file", part)
            }
            ProbePayload::ImageUrl(url) => Form::new().text("imageUrl", url),
        };

        Ok(form.text("filters", request.filters_json))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: SearchRequest) -> ClientResult<Vec<ResultItem>> {
        let seq = request.seq;
        debug!(seq, endpoint = %self.endpoint, probe = ?request.probe, "Posting search request");

        let form = Self::build_form(request)?;
        let response = self.http.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_EXCERPT).collect(),
            });
        }

        let items: Vec<ResultItem> = serde_json::from_slice(&body)?;
        info!(seq, count = items.len(), "Search service responded");
        Ok(items)
    }
}
