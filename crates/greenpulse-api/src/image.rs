// Static image source client
//
// Fetches reference images by URL. Only `200 OK` counts as success; the
// body is returned as raw bytes for the caller to encode and cache.

use bytes::Bytes;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};

/// HTTP client for static reference images.
#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    timeout_secs: u64,
}

impl ImageClient {
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }

    /// Download the image at `url`.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes, Error> {
        debug!(%url, "GET image");

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        debug!(%url, len = bytes.len(), "image downloaded");
        Ok(bytes)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}
