/// Torrent index service.
///
/// This module provides the per-episode torrent record served by the index
/// and the client operations that page through it.
mod wire;

use crate::client::{EztvClient, StatusPolicy};
use crate::filter::{EpisodeKey, filter_episode};
use crate::pagination::{PageLimits, collect_pages};
use crate::request::QueryParams;
use crate::transport::Transport;
use crate::{EztvError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use wire::{WireTorrentPage, normalize_torrent};

const TORRENTS_PATH: &str = "/api/get-torrents";

/// A torrent of a single episode, as listed by the torrent index.
///
/// URLs and the IMDb id are normalized: screenshots always carry an
/// `https:` scheme and the IMDb id always carries its "tt" prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeTorrent {
    pub id: u64,
    /// Info hash, hex encoded
    pub hash: String,
    pub filename: String,
    /// Page of the episode on the index
    pub episode_url: String,
    pub torrent_url: String,
    pub magnet_url: String,
    pub title: String,
    pub imdb_id: String,
    pub season: u32,
    pub episode: u32,
    pub small_screenshot: String,
    pub large_screenshot: String,
    pub seeds: u64,
    pub peers: u64,
    pub date_released: DateTime<Utc>,
    /// Size in bytes
    pub size: u64,
}

impl EpisodeKey for EpisodeTorrent {
    fn season(&self) -> u32 {
        self.season
    }

    fn episode(&self) -> u32 {
        self.episode
    }
}

fn decode_page(body: &[u8]) -> Result<WireTorrentPage> {
    serde_json::from_slice(body).map_err(|e| EztvError::MalformedResponse(e.to_string()))
}

impl<T: Transport> EztvClient<T> {
    fn fetch_torrent_page(&self, params: &QueryParams) -> Result<WireTorrentPage> {
        let body = self.fetch(
            &self.config.torrent_endpoint,
            TORRENTS_PATH,
            params,
            StatusPolicy::OkOnly,
        )?;

        // Parse the JSON response
        let page = decode_page(&body)?;
        debug!(
            page = page.page,
            limit = page.limit,
            torrents_count = page.torrents_count,
            received = page.torrents.len(),
            "torrent page decoded"
        );
        Ok(page)
    }

    /// Fetches every torrent of a show, following pagination.
    ///
    /// Pages of `page_size` entries are requested until one comes back
    /// short or `max_pages` pages were read. The "tt" prefix of `imdb_id`
    /// is optional.
    ///
    /// # Errors
    ///
    /// * [`EztvError::MissingArgument`] if `imdb_id` is empty or only "tt"
    /// * [`EztvError::InvalidArgument`] if the configured page size is 0
    /// * [`EztvError::ShowNotFound`] if the first page has no IMDb id or no
    ///   torrents
    ///
    /// Any failure discards the pages fetched so far.
    pub fn show_torrents(&self, imdb_id: &str) -> Result<Vec<EpisodeTorrent>> {
        // The index expects the bare numeric id
        let bare_id = imdb_id.strip_prefix("tt").unwrap_or(imdb_id);
        if bare_id.is_empty() {
            return Err(EztvError::MissingArgument("imdb_id"));
        }

        // A zero page size would never produce a short page
        if self.config.page_size == 0 {
            return Err(EztvError::InvalidArgument(
                "page size must be positive".to_string(),
            ));
        }

        let limits = PageLimits {
            page_size: self.config.page_size,
            max_pages: self.config.max_pages,
        };

        let fetch_page = |page: u32, page_size: u32| -> Result<Vec<EpisodeTorrent>> {
            // Build the query for this page
            let mut params = QueryParams::new();
            params.insert("imdb_id", bare_id.to_string());
            params.insert("limit", page_size.to_string());
            params.insert("page", page.to_string());

            let response = self.fetch_torrent_page(&params)?;

            // Unknown ids come back as 200 with no imdb_id or no torrents
            if page == 1 {
                let known = response.imdb_id.as_deref().is_some_and(|id| !id.is_empty());
                if !known || response.torrents_count == 0 {
                    return Err(EztvError::ShowNotFound(imdb_id.to_string()));
                }
            }

            // Normalize every entry of the page
            response
                .torrents
                .into_iter()
                .map(normalize_torrent)
                .collect()
        };

        let (torrents, exhaustion) = collect_pages(limits, fetch_page)?;

        debug!(
            imdb_id,
            ?exhaustion,
            count = torrents.len(),
            "show torrents collected"
        );
        Ok(torrents)
    }

    /// Fetches the torrents of one episode of a show.
    ///
    /// All torrents matching the season and episode are returned, in index
    /// order.
    pub fn episode_torrents(
        &self,
        imdb_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<Vec<EpisodeTorrent>> {
        let torrents = filter_episode(self.show_torrents(imdb_id)?, season, episode);
        if torrents.is_empty() {
            return Err(EztvError::EpisodeNotFound { season, episode });
        }
        Ok(torrents)
    }

    /// Fetches a single page of the latest torrents, across all shows.
    pub fn torrents(&self, limit: u32, page: u32) -> Result<Vec<EpisodeTorrent>> {
        if limit == 0 {
            return Err(EztvError::InvalidArgument(
                "limit must be positive".to_string(),
            ));
        }
        if page == 0 {
            return Err(EztvError::InvalidArgument(
                "page numbers start at 1".to_string(),
            ));
        }

        let mut params = QueryParams::new();
        params.insert("limit", limit.to_string());
        params.insert("page", page.to_string());

        let response = self.fetch_torrent_page(&params)?;
        response
            .torrents
            .into_iter()
            .map(normalize_torrent)
            .collect()
    }
}
