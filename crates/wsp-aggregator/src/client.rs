use bytes::Bytes;
use reqwest::header::RANGE;
use reqwest::StatusCode;
use wsp_crypto::ContentHasher;
use wsp_types::ResourceRecord;

use crate::endpoint::{blob_reference, endpoint_url};
use crate::error::{AggregatorError, AggregatorResult};

/// HTTP client for one Walrus aggregator.
#[derive(Clone)]
pub struct AggregatorClient {
    base_url: String,
    client: reqwest::Client,
}

impl AggregatorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and verify the content of a resource.
    ///
    /// Returns `Ok(None)` if the aggregator answers 404. Any other failure
    /// status is an error and is not retried. Bytes are only returned once
    /// their SHA-256 matches `record.blob_hash`.
    pub async fn fetch_resource(&self, record: &ResourceRecord) -> AggregatorResult<Option<Bytes>> {
        let reference = blob_reference(record)?;
        let url = endpoint_url(&self.base_url, &reference);

        let mut request = self.client.get(&url);
        if let Some(range) = &record.range {
            request = request.header(RANGE, range.to_header_value());
        }
        tracing::debug!(%url, range = ?record.range, "fetching from aggregator");

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(%url, "aggregator: not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AggregatorError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let computed = ContentHasher::digest(&body).to_base64();
        let expected = record.blob_hash.to_base64();
        if computed != expected {
            tracing::warn!(%url, %expected, %computed, "aggregator response failed hash check");
            return Err(AggregatorError::ChecksumMismatch { expected, computed });
        }
        Ok(Some(body))
    }
}
