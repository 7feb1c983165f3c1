//! Client configuration
//!
//! Endpoints and pagination limits are plain values handed to the client at
//! construction time, so tests can point the client at a fake upstream.

use std::time::Duration;

/// Default base URL of the show metadata service
pub const DEFAULT_SHOW_ENDPOINT: &str = "http://eztvapi.ml";

/// Default base URL of the torrent index service
pub const DEFAULT_TORRENT_ENDPOINT: &str = "https://eztv.io";

/// Number of entries requested per torrent page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Upper bound of pages fetched for a single show
pub const DEFAULT_MAX_PAGES: u32 = 20;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration of an [`EztvClient`](crate::EztvClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the show metadata service
    pub show_endpoint: String,
    /// Base URL of the torrent index service
    pub torrent_endpoint: String,
    /// Entries requested per page when paginating torrents
    pub page_size: u32,
    /// Maximum number of pages fetched for one show
    pub max_pages: u32,
    /// Request timeout applied by the HTTP transport (`None` disables it)
    pub timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            show_endpoint: DEFAULT_SHOW_ENDPOINT.to_string(),
            torrent_endpoint: DEFAULT_TORRENT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!("eztv/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_show_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.show_endpoint = endpoint.into();
        self
    }

    pub fn with_torrent_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.torrent_endpoint = endpoint.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.show_endpoint, "http://eztvapi.ml");
        assert_eq!(config.torrent_endpoint, "https://eztv.io");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_pages, 20);
        assert!(config.user_agent.starts_with("eztv/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_show_endpoint("http://127.0.0.1:8080")
            .with_torrent_endpoint("http://127.0.0.1:8081")
            .with_page_size(10)
            .with_max_pages(2)
            .with_timeout(None);
        assert_eq!(config.show_endpoint, "http://127.0.0.1:8080");
        assert_eq!(config.torrent_endpoint, "http://127.0.0.1:8081");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_pages, 2);
        assert_eq!(config.timeout, None);
    }
}
