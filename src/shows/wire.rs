/// Show service response types for deserialization.
///
/// These structures mirror the JSON emitted by the show service. Every field
/// falls back to its default when missing or `null`, so an unknown show
/// (`{}`) decodes to an empty record.
use super::{Show, ShowEpisode, ShowImages, ShowRating, ShowTorrent, Status};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Deserializes `null` as the default value of `T`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of the root endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct WireStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(rename = "totalShows", deserialize_with = "null_as_default")]
    pub total_shows: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

/// A show, as returned by `/show/{id}` and inside `/shows/{page}` arrays.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct WireShow {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub imdb_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tvdb_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub synopsis: String,
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub runtime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub air_day: String,
    #[serde(deserialize_with = "null_as_default")]
    pub air_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub num_seasons: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: WireRating,
    #[serde(deserialize_with = "null_as_default")]
    pub images: WireImages,
    #[serde(deserialize_with = "null_as_default")]
    pub episodes: Vec<Option<WireEpisode>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct WireRating {
    #[serde(deserialize_with = "null_as_default")]
    pub percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub votes: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub loved: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub hated: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct WireImages {
    #[serde(deserialize_with = "null_as_default")]
    pub poster: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fanart: String,
    #[serde(deserialize_with = "null_as_default")]
    pub banner: String,
}

/// A single episode embedded in a show.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct WireEpisode {
    #[serde(deserialize_with = "null_as_default")]
    pub season: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub episode: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_aired: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tvdb_id: i64,
    /// Torrents keyed by quality label ("480p", "720p", ...)
    #[serde(deserialize_with = "null_as_default")]
    pub torrents: HashMap<String, Option<WireTorrent>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct WireTorrent {
    #[serde(deserialize_with = "null_as_default")]
    pub peers: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub seeds: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl From<WireStatus> for Status {
    fn from(wire: WireStatus) -> Self {
        Status {
            status: wire.status,
            uptime: wire.uptime,
            server: wire.server,
            updated: wire.updated,
            total_shows: wire.total_shows,
            version: wire.version,
        }
    }
}

impl From<WireShow> for Show {
    fn from(wire: WireShow) -> Self {
        Show {
            id: wire.id,
            imdb_id: wire.imdb_id,
            tvdb_id: wire.tvdb_id,
            title: wire.title,
            slug: wire.slug,
            synopsis: wire.synopsis,
            network: wire.network,
            country: wire.country,
            runtime: wire.runtime,
            year: wire.year,
            status: wire.status,
            air_day: wire.air_day,
            air_time: wire.air_time,
            num_seasons: wire.num_seasons,
            last_updated: wire.last_updated,
            genres: wire.genres,
            rating: ShowRating {
                percentage: wire.rating.percentage,
                votes: wire.rating.votes,
                loved: wire.rating.loved,
                hated: wire.rating.hated,
            },
            images: ShowImages {
                poster: wire.images.poster,
                fanart: wire.images.fanart,
                banner: wire.images.banner,
            },
            episodes: wire
                .episodes
                .into_iter()
                .flatten()
                .map(ShowEpisode::from)
                .collect(),
        }
    }
}

impl From<WireEpisode> for ShowEpisode {
    fn from(wire: WireEpisode) -> Self {
        ShowEpisode {
            season: wire.season,
            episode: wire.episode,
            title: wire.title,
            overview: wire.overview,
            first_aired: wire.first_aired,
            tvdb_id: wire.tvdb_id,
            torrents: wire
                .torrents
                .into_iter()
                .filter_map(|(quality, torrent)| {
                    torrent.map(|t| {
                        (
                            quality,
                            ShowTorrent {
                                peers: t.peers,
                                seeds: t.seeds,
                                url: t.url,
                            },
                        )
                    })
                })
                .collect(),
        }
    }
}
