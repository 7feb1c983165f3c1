//! API client
//!
//! [`EztvClient`] owns the configuration and the transport. The operations
//! for each upstream service live in their own modules as `impl` blocks.

use crate::config::ClientConfig;
use crate::request::{QueryParams, build_url};
use crate::transport::{HttpTransport, Transport};
use crate::{EztvError, Result};
use tracing::debug;

/// How strictly a service's status codes are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusPolicy {
    /// Any 2xx status is accepted
    AnySuccess,
    /// Only 200 is accepted
    OkOnly,
}

/// Client for the show metadata and torrent index services
///
/// Every operation performs its requests sequentially and returns once all
/// of them completed. The client holds no state besides its configuration.
pub struct EztvClient<T = HttpTransport> {
    pub(crate) config: ClientConfig,
    transport: T,
}

impl EztvClient<HttpTransport> {
    /// Creates a client talking HTTP to the endpoints of `config`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> EztvClient<T> {
    /// Creates a client using a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration of this client
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport of this client
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs a GET against `endpoint` + `path` and returns the body.
    pub(crate) fn fetch(
        &self,
        endpoint: &str,
        path: &str,
        params: &QueryParams,
        policy: StatusPolicy,
    ) -> Result<Vec<u8>> {
        // Build the request URL
        let url = build_url(endpoint, path, params)?;
        debug!(url = %url, "GET");

        // Make the HTTP request
        let response = self.transport.get(&url)?;

        // Ensure the status is one this service answers with on success
        let accepted = match policy {
            StatusPolicy::AnySuccess => response.is_success(),
            StatusPolicy::OkOnly => response.status == 200,
        };
        if !accepted {
            return Err(EztvError::UnexpectedStatus {
                status: response.status,
                url: url.to_string(),
            });
        }

        debug!(
            status = response.status,
            bytes = response.body.len(),
            "response received"
        );
        Ok(response.body)
    }
}
