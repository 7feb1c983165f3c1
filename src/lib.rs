//! eztv - Blocking client for the EZTV APIs
//!
//! This library talks to two upstream services: a show metadata service
//! (shows, seasons, episodes and their quality-keyed torrents) and a torrent
//! index (per-episode torrent records, paginated). Responses are decoded
//! into a private wire schema first and then mapped into the public records
//! exported here, so upstream quirks never reach calling code.
//!
//! # Examples
//!
//! ```no_run
//! use eztv::{ClientConfig, EztvClient};
//!
//! let client = EztvClient::new(ClientConfig::default()).unwrap();
//!
//! let episode = client.episode("tt0944947", 1, 1).unwrap();
//! println!("S01E01 - {}", episode.title);
//!
//! for torrent in client.episode_torrents("tt0944947", 1, 1).unwrap() {
//!     println!("{} ({} seeds)", torrent.filename, torrent.seeds);
//! }
//! ```

mod client;
mod config;
mod filter;
mod pagination;
mod request;
mod shows;
mod torrents;
mod transport;

pub use client::EztvClient;
pub use config::{
    ClientConfig, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_SHOW_ENDPOINT,
    DEFAULT_TORRENT_ENDPOINT,
};
pub use filter::{EpisodeKey, filter_episode, filter_season, find_episode};
pub use shows::{Show, ShowEpisode, ShowImages, ShowRating, ShowTorrent, Status};
pub use torrents::EpisodeTorrent;
pub use transport::{HttpTransport, RawResponse, Transport};

use thiserror::Error;

/// Errors returned by every client operation
#[derive(Debug, Error)]
pub enum EztvError {
    /// A required string argument was empty
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// An argument was out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configured endpoint is not a valid URL
    #[error("Invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    /// The server answered with a body too short to be JSON
    #[error("Empty response from server")]
    EmptyResponse,

    /// The requested show does not exist upstream
    #[error("Show not found: {0}")]
    ShowNotFound(String),

    /// The show has no such season/episode pair
    #[error("Episode S{season:02}E{episode:02} not found")]
    EpisodeNotFound { season: u32, episode: u32 },

    /// The response body could not be decoded
    #[error("Failed to parse API response: {0}")]
    MalformedResponse(String),

    /// Network-level failure
    #[error("Request failed: {0}")]
    TransportError(String),

    /// The server answered with a status code that is not accepted
    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EztvError>;
