//! HTTP transport
//!
//! A single blocking GET per call. The [`Transport`] trait is the seam used
//! to substitute the real upstream in tests.

use crate::config::ClientConfig;
use crate::{EztvError, Result};
use url::Url;

/// Raw response of a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns true for 2xx status codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform a blocking HTTP GET
pub trait Transport {
    /// Fetches `url` and returns the status code and body.
    ///
    /// Status codes are not interpreted here; only network-level failures
    /// produce [`EztvError::TransportError`].
    fn get(&self, url: &Url) -> Result<RawResponse>;
}

/// Transport backed by a blocking reqwest client
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport honoring the timeout and user agent of `config`.
    ///
    /// Idle connections are not kept, so every request opens and closes its
    /// own connection.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| EztvError::TransportError(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<RawResponse> {
        // Make the HTTP request
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| EztvError::TransportError(e.to_string()))?;

        // Read the whole body, whatever the status
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| EztvError::TransportError(e.to_string()))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
