//! Search service client.
//!
//! [`SearchBackend`] is the single async boundary of a session: one call, one
//! request, one ranked list back. [`HttpSearchClient`] implements it as a
//! multipart POST against the configured endpoint.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ResultItem;

pub use http::HttpSearchClient;

/// Errors that can occur while talking to the search service.
///
/// Sessions collapse all of these into a generic "fetch failed"; the detail
/// only reaches the logs.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Request(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Probe content as it goes on the wire.
#[derive(Clone, PartialEq, Eq)]
pub enum ProbePayload {
    /// Sent as the `file` multipart part.
    File {
        file_name: String,
        mime_type: &'static str,
        bytes: Vec<u8>,
    },
    /// Sent as the `imageUrl` text field, already normalized.
    ImageUrl(String),
}

impl std::fmt::Debug for ProbePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbePayload::File {
                file_name,
                mime_type,
                bytes,
            } => f
                .debug_struct("File")
                .field("file_name", file_name)
                .field("mime_type", mime_type)
                .field("len", &bytes.len())
                .finish(),
            ProbePayload::ImageUrl(url) => f.debug_tuple("ImageUrl").field(url).finish(),
        }
    }
}

/// One outbound search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Session sequence number this request was issued under.
    pub seq: u64,
    pub probe: ProbePayload,
    /// JSON-serialized filter criteria, sent for information only.
    pub filters_json: String,
}

/// Remote visual-similarity search.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search and return the candidates in service rank order.
    async fn search(&self, request: SearchRequest) -> ClientResult<Vec<ResultItem>>;
}
