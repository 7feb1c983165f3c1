/// Torrent index response types and their normalization.
///
/// The index encodes several numbers as strings, omits the "tt" prefix of
/// IMDb ids and serves screenshots with scheme-relative URLs. The wire
/// records keep those values verbatim; [`normalize_torrent`] turns them into
/// [`EpisodeTorrent`]s.
use super::EpisodeTorrent;
use crate::{EztvError, Result};
use chrono::DateTime;
use serde::{Deserialize, Deserializer};

/// A page of the `/api/get-torrents` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct WireTorrentPage {
    #[serde(default)]
    pub torrents_count: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub page: u32,
    /// Only present when filtering by IMDb id; absent for unknown shows
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub torrents: Vec<WireTorrent>,
}

/// A single torrent entry, as sent by the index.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct WireTorrent {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub episode_url: String,
    #[serde(default)]
    pub torrent_url: String,
    #[serde(default)]
    pub magnet_url: String,
    #[serde(default)]
    pub title: String,
    /// Bare numeric id, without "tt"
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default, deserialize_with = "numeric_string")]
    pub season: String,
    #[serde(default, deserialize_with = "numeric_string")]
    pub episode: String,
    /// Scheme-relative URL ("//host/path")
    #[serde(default)]
    pub small_screenshot: String,
    /// Scheme-relative URL ("//host/path")
    #[serde(default)]
    pub large_screenshot: String,
    #[serde(default)]
    pub seeds: u64,
    #[serde(default)]
    pub peers: u64,
    /// Missing dates decode as the unix epoch
    #[serde(default)]
    pub date_released_unix: i64,
    #[serde(default, deserialize_with = "numeric_string")]
    pub size_bytes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<WireTorrent>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a number encoded either as a JSON string or a JSON number.
fn numeric_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => s,
        Some(StringOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Parses a numeric string; an empty value counts as zero.
fn parse_number<N: std::str::FromStr + Default>(field: &str, value: &str) -> Result<N> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(N::default());
    }
    value.parse().map_err(|_| {
        EztvError::MalformedResponse(format!("{} is not a number: {:?}", field, value))
    })
}

/// Prefixes an IMDb id with "tt" unless it already has it.
pub(crate) fn with_imdb_prefix(id: &str) -> String {
    if id.is_empty() || id.starts_with("tt") {
        id.to_string()
    } else {
        format!("tt{}", id)
    }
}

/// Turns a scheme-relative URL into an https one.
pub(crate) fn with_https_scheme(url: &str) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Maps a wire torrent into its public, normalized form.
pub(super) fn normalize_torrent(wire: WireTorrent) -> Result<EpisodeTorrent> {
    // Convert the release timestamp
    let date_released = DateTime::from_timestamp(wire.date_released_unix, 0).ok_or_else(|| {
        EztvError::MalformedResponse(format!(
            "date_released_unix out of range: {}",
            wire.date_released_unix
        ))
    })?;

    Ok(EpisodeTorrent {
        id: wire.id,
        hash: wire.hash,
        filename: wire.filename,
        episode_url: wire.episode_url,
        torrent_url: wire.torrent_url,
        magnet_url: wire.magnet_url,
        title: wire.title,
        // Restore the "tt" prefix the index drops
        imdb_id: with_imdb_prefix(&wire.imdb_id),
        // Numbers arrive as strings
        season: parse_number("season", &wire.season)?,
        episode: parse_number("episode", &wire.episode)?,
        // Screenshots are scheme-relative
        small_screenshot: with_https_scheme(&wire.small_screenshot),
        large_screenshot: with_https_scheme(&wire.large_screenshot),
        seeds: wire.seeds,
        peers: wire.peers,
        date_released,
        size: parse_number("size_bytes", &wire.size_bytes)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_torrent() -> WireTorrent {
        serde_json::from_str(
            r#"{
                "id": 1443504,
                "hash": "033712dc2a9c6b23edbcbea737ee6ecf02619c2e",
                "filename": "The.Joy.of.Painting.S01E10.INTERNAL.480p.x264-mSD[eztv].mkv",
                "title": "The Joy of Painting S01E10 INTERNAL 480p x264-mSD EZTV",
                "imdb_id": "0383795",
                "season": "1",
                "episode": "10",
                "small_screenshot": "//ezimg.ch/x.jpg",
                "large_screenshot": "//ezimg.ch/y.jpg",
                "seeds": 64,
                "peers": 0,
                "date_released_unix": 1588784249,
                "size_bytes": "86643580"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_torrent() {
        let torrent = normalize_torrent(wire_torrent()).unwrap();

        assert_eq!(torrent.season, 1);
        assert_eq!(torrent.episode, 10);
        assert_eq!(torrent.imdb_id, "tt0383795");
        assert_eq!(torrent.size, 86643580);
        assert_eq!(torrent.small_screenshot, "https://ezimg.ch/x.jpg");
        assert_eq!(torrent.large_screenshot, "https://ezimg.ch/y.jpg");
        assert_eq!(torrent.date_released.timestamp(), 1588784249);
        assert_eq!(torrent.seeds, 64);
    }

    #[test]
    fn test_numbers_may_arrive_unquoted() {
        let wire: WireTorrent = serde_json::from_str(
            r#"{"id": 1, "season": 3, "episode": "", "size_bytes": 42, "date_released_unix": 0}"#,
        )
        .unwrap();

        let torrent = normalize_torrent(wire).unwrap();
        assert_eq!(torrent.season, 3);
        assert_eq!(torrent.episode, 0);
        assert_eq!(torrent.size, 42);
    }

    #[test]
    fn test_missing_id_and_date_fall_back_to_defaults() {
        let wire: WireTorrent =
            serde_json::from_str(r#"{"season": "2", "episode": "5", "imdb_id": "0383795"}"#)
                .unwrap();

        let torrent = normalize_torrent(wire).unwrap();
        assert_eq!(torrent.id, 0);
        assert_eq!(torrent.date_released.timestamp(), 0);
        assert_eq!(torrent.season, 2);
        assert_eq!(torrent.imdb_id, "tt0383795");
    }

    #[test]
    fn test_unparsable_number_is_malformed() {
        let mut wire = wire_torrent();
        wire.size_bytes = "lots".to_string();
        assert!(matches!(
            normalize_torrent(wire),
            Err(EztvError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_out_of_range_date_is_malformed() {
        let mut wire = wire_torrent();
        wire.date_released_unix = i64::MAX;
        assert!(matches!(
            normalize_torrent(wire),
            Err(EztvError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_with_imdb_prefix() {
        assert_eq!(with_imdb_prefix("0383795"), "tt0383795");
        assert_eq!(with_imdb_prefix("tt0383795"), "tt0383795");
        assert_eq!(with_imdb_prefix(""), "");
    }

    #[test]
    fn test_with_https_scheme() {
        assert_eq!(with_https_scheme("//ezimg.ch/a.jpg"), "https://ezimg.ch/a.jpg");
        assert_eq!(with_https_scheme("https://ezimg.ch/a.jpg"), "https://ezimg.ch/a.jpg");
        assert_eq!(with_https_scheme("http://ezimg.ch/a.jpg"), "http://ezimg.ch/a.jpg");
        assert_eq!(with_https_scheme(""), "");
    }
}
