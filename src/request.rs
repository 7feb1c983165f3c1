//! Request URL construction
//!
//! Query parameters are emitted sorted by key, form-urlencoded.

use crate::{EztvError, Result};
use std::collections::BTreeMap;
use url::Url;

/// Query parameters, kept sorted by name
pub(crate) type QueryParams = BTreeMap<&'static str, String>;

/// Builds a request URL from a base endpoint, a resource path and query parameters
///
/// The path is appended to the endpoint as-is, so an endpoint carrying a
/// path prefix (e.g. `http://host/api/v1`) keeps it. No `?` is emitted when
/// `params` is empty.
///
/// # Errors
///
/// Returns [`EztvError::InvalidEndpoint`] if the endpoint is not a valid URL.
pub(crate) fn build_url(endpoint: &str, path: &str, params: &QueryParams) -> Result<Url> {
    let base = endpoint.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let raw = format!("{}/{}", base, path);

    let mut url = Url::parse(&raw).map_err(|source| EztvError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }

    Ok(url)
}

/// Path and query of a URL, as seen by the server
#[cfg(test)]
pub(crate) fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_are_sorted_by_key() {
        let mut params = QueryParams::new();
        params.insert("page", "1".to_string());
        params.insert("limit", "100".to_string());
        params.insert("imdb_id", "0383795".to_string());

        let url = build_url("https://eztv.io", "/api/get-torrents", &params).unwrap();
        assert_eq!(
            request_uri(&url),
            "/api/get-torrents?imdb_id=0383795&limit=100&page=1"
        );
    }

    #[test]
    fn test_no_query_without_params() {
        let url = build_url("http://eztvapi.ml/", "/shows/3", &QueryParams::new()).unwrap();
        assert_eq!(url.as_str(), "http://eztvapi.ml/shows/3");
    }

    #[test]
    fn test_endpoint_path_prefix_is_kept() {
        let url = build_url("http://localhost:9000/mirror", "/show/tt1", &QueryParams::new())
            .unwrap();
        assert_eq!(url.path(), "/mirror/show/tt1");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let mut params = QueryParams::new();
        params.insert("keywords", "the office & co".to_string());

        let url = build_url("http://eztvapi.ml", "/shows/1", &params).unwrap();
        assert_eq!(request_uri(&url), "/shows/1?keywords=the+office+%26+co");
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = build_url("not a url", "/", &QueryParams::new()).unwrap_err();
        assert!(matches!(err, EztvError::InvalidEndpoint { .. }));
    }
}
