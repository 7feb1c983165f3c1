/// Show metadata service.
///
/// This module provides the records returned by the show service (shows,
/// episodes, ratings, images and quality-keyed torrents) and the client
/// operations that fetch and select them.
mod wire;

use crate::client::{EztvClient, StatusPolicy};
use crate::filter::{EpisodeKey, filter_season, find_episode};
use crate::request::QueryParams;
use crate::transport::Transport;
use crate::{EztvError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use wire::{WireShow, WireStatus};

/// Smallest valid JSON body the show service can answer with (`{}`)
const MIN_BODY_LEN: usize = 2;

/// Health snapshot of the show service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub status: String,
    /// Uptime in seconds
    pub uptime: i64,
    /// Server identifier
    pub server: String,
    /// Unix timestamp of the last catalogue update
    pub updated: i64,
    pub total_shows: i64,
    pub version: String,
}

/// A TV series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    /// Identifier internal to the show service
    pub id: String,
    pub imdb_id: String,
    pub tvdb_id: String,
    pub title: String,
    pub slug: String,
    pub synopsis: String,
    pub network: String,
    pub country: String,
    /// Episode runtime in minutes, as reported upstream
    pub runtime: String,
    pub year: String,
    /// Airing status ("continuing", "ended", ...)
    pub status: String,
    pub air_day: String,
    pub air_time: String,
    pub num_seasons: u32,
    /// Unix timestamp of the last update of this show
    pub last_updated: i64,
    pub genres: Vec<String>,
    pub rating: ShowRating,
    pub images: ShowImages,
    /// Episodes in upstream order; empty in show listings
    pub episodes: Vec<ShowEpisode>,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowEpisode {
    pub season: u32,
    pub episode: u32,
    pub title: String,
    pub overview: String,
    /// Unix timestamp of the first broadcast
    pub first_aired: i64,
    pub tvdb_id: i64,
    /// Torrents keyed by quality label ("480p", "720p", ...)
    pub torrents: BTreeMap<String, ShowTorrent>,
}

/// Audience rating of a show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowRating {
    pub percentage: f64,
    pub votes: u64,
    pub loved: u64,
    pub hated: u64,
}

/// Artwork of a show. The banner may be a relative placeholder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowImages {
    pub poster: String,
    pub fanart: String,
    pub banner: String,
}

/// A torrent attached to a show episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowTorrent {
    pub peers: u64,
    pub seeds: u64,
    /// Magnet link or torrent file URL
    pub url: String,
}

impl EpisodeKey for ShowEpisode {
    fn season(&self) -> u32 {
        self.season
    }

    fn episode(&self) -> u32 {
        self.episode
    }
}

/// Decodes a show service body into `T`.
///
/// Bodies shorter than `{}` are reported as [`EztvError::EmptyResponse`],
/// since the service occasionally answers with nothing at all.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.len() < MIN_BODY_LEN {
        return Err(EztvError::EmptyResponse);
    }
    serde_json::from_slice(body).map_err(|e| EztvError::MalformedResponse(e.to_string()))
}

impl<T: Transport> EztvClient<T> {
    fn fetch_shows_body(&self, path: &str, params: &QueryParams) -> Result<Vec<u8>> {
        self.fetch(
            &self.config.show_endpoint,
            path,
            params,
            StatusPolicy::AnySuccess,
        )
    }

    /// Checks whether the show service is alive.
    pub fn ping(&self) -> Result<Status> {
        let body = self.fetch_shows_body("/", &QueryParams::new())?;
        let status: WireStatus = decode(&body)?;
        Ok(status.into())
    }

    /// Fetches a show with all of its episodes.
    ///
    /// # Errors
    ///
    /// * [`EztvError::MissingArgument`] if `imdb_id` is empty
    /// * [`EztvError::EmptyResponse`] if the service returned no usable body
    /// * [`EztvError::ShowNotFound`] if the show has no title (unknown id)
    pub fn show_details(&self, imdb_id: &str) -> Result<Show> {
        if imdb_id.is_empty() {
            return Err(EztvError::MissingArgument("imdb_id"));
        }

        // Fetch and parse the show document
        let body = self.fetch_shows_body(&format!("/show/{}", imdb_id), &QueryParams::new())?;
        let show: WireShow = decode(&body)?;

        // The service answers unknown ids with an empty object
        if show.title.is_empty() {
            return Err(EztvError::ShowNotFound(imdb_id.to_string()));
        }

        Ok(show.into())
    }

    /// Fetches a single episode of a show.
    pub fn episode(&self, imdb_id: &str, season: u32, episode: u32) -> Result<ShowEpisode> {
        let show = self.show_details(imdb_id)?;
        find_episode(&show.episodes, season, episode)
            .cloned()
            .ok_or(EztvError::EpisodeNotFound { season, episode })
    }

    /// Fetches every episode of a season, in upstream order.
    ///
    /// An unknown season yields an empty list, not an error.
    pub fn season(&self, imdb_id: &str, season: u32) -> Result<Vec<ShowEpisode>> {
        let show = self.show_details(imdb_id)?;
        Ok(filter_season(show.episodes, season))
    }

    /// Lists one page of shows (without episodes).
    ///
    /// Pages start at 1.
    pub fn list_shows(&self, page: u32) -> Result<Vec<Show>> {
        self.shows(None, page)
    }

    /// Searches shows by keyword on the first result page.
    pub fn search_shows(&self, keyword: &str) -> Result<Vec<Show>> {
        if keyword.is_empty() {
            return Err(EztvError::MissingArgument("keyword"));
        }
        self.shows(Some(keyword), 1)
    }

    fn shows(&self, keyword: Option<&str>, page: u32) -> Result<Vec<Show>> {
        if page == 0 {
            return Err(EztvError::InvalidArgument(
                "page numbers start at 1".to_string(),
            ));
        }

        // Build the query parameters
        let mut params = QueryParams::new();
        if let Some(keyword) = keyword {
            params.insert("keywords", keyword.to_string());
        }

        let body = self.fetch_shows_body(&format!("/shows/{}", page), &params)?;
        let shows: Vec<WireShow> = decode(&body)?;

        // Convert to our domain model
        Ok(shows.into_iter().map(Show::from).collect())
    }
}
