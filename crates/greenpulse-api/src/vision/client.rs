// Vision API HTTP client
//
// Wraps `reqwest::Client` with the provider's URL construction, API-key
// query parameter, and error-envelope handling. The key is never logged:
// transport errors are stripped of their URL before they leave this module.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};
use crate::vision::models::{
    AnnotateImageResponse, BatchAnnotateRequest, error_from_body, parse_batch_response,
};

/// Default public endpoint of the classification provider.
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";

/// Raw HTTP client for the `images:annotate` endpoint.
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: SecretString,
    timeout_secs: u64,
}

impl VisionClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `endpoint` is the provider root (e.g. `https://vision.googleapis.com`);
    /// the `/v1/images:annotate` path is appended per request.
    pub fn new(
        endpoint: Url,
        api_key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint,
            api_key,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url, api_key: SecretString) -> Self {
        Self {
            http,
            endpoint,
            api_key,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }

    /// The provider base URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `{endpoint}/v1/images:annotate?key={api_key}`
    fn annotate_url(&self) -> Result<Url, Error> {
        let full = format!(
            "{}/v1/images:annotate",
            self.endpoint.as_str().trim_end_matches('/')
        );
        let mut url = Url::parse(&full)?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());
        Ok(url)
    }

    /// Run object localization, label detection and face detection on a
    /// base64-encoded image.
    ///
    /// `POST /v1/images:annotate`
    pub async fn annotate(&self, image_base64: &str) -> Result<AnnotateImageResponse, Error> {
        let url = self.annotate_url()?;
        debug!(
            endpoint = %self.endpoint,
            payload_len = image_base64.len(),
            "POST images:annotate"
        );

        let resp = self
            .http
            .post(url)
            .json(&BatchAnnotateRequest::occupancy(image_base64))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        parse_batch_response(&body)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err.without_url())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn annotate_url_appends_path_and_key() {
        let client = VisionClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://vision.example.com/").expect("valid URL"),
            SecretString::from("k3y".to_string()),
        );
        let url = client.annotate_url().expect("valid annotate URL");
        assert_eq!(
            url.as_str(),
            "https://vision.example.com/v1/images:annotate?key=k3y"
        );
    }
}
