//! Page-by-page accumulation
//!
//! Pages are requested strictly in sequence. The loop stops when a page
//! comes back short, or when the page ceiling is reached. A failing page
//! discards everything accumulated so far.

use crate::Result;
use tracing::{debug, trace};

/// Limits of a pagination run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageLimits {
    /// Entries requested per page; a page with fewer entries is the last one
    pub page_size: u32,
    /// Maximum number of pages requested
    pub max_pages: u32,
}

/// Why a pagination run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exhaustion {
    /// A page returned fewer entries than requested
    ShortPage,
    /// The page ceiling was reached
    PageCeiling,
}

/// Drives `fetch_page` from page 1 until exhaustion
///
/// `fetch_page` receives the 1-based page number and the requested page
/// size, and is responsible for validating the page it fetched (for
/// instance rejecting an empty first page).
pub(crate) fn collect_pages<T, F>(
    limits: PageLimits,
    mut fetch_page: F,
) -> Result<(Vec<T>, Exhaustion)>
where
    F: FnMut(u32, u32) -> Result<Vec<T>>,
{
    let mut entries = Vec::new();
    let mut page = 1;

    let exhaustion = loop {
        debug!(page, page_size = limits.page_size, "fetching page");
        let batch = fetch_page(page, limits.page_size)?;
        let received = batch.len();
        entries.extend(batch);
        trace!(page, received, total = entries.len(), "page accumulated");

        if received < limits.page_size as usize {
            break Exhaustion::ShortPage;
        }
        if page >= limits.max_pages {
            break Exhaustion::PageCeiling;
        }
        page += 1;
    };

    debug!(?exhaustion, pages = page, total = entries.len(), "pagination finished");
    Ok((entries, exhaustion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EztvError;

    const LIMITS: PageLimits = PageLimits {
        page_size: 3,
        max_pages: 4,
    };

    #[test]
    fn test_stops_on_short_page() {
        let mut requested = Vec::new();
        let (entries, exhaustion) = collect_pages(LIMITS, |page, size| {
            requested.push((page, size));
            Ok(match page {
                1 => vec![1, 2, 3],
                2 => vec![4],
                _ => unreachable!("page {page} should not be requested"),
            })
        })
        .unwrap();

        assert_eq!(requested, vec![(1, 3), (2, 3)]);
        assert_eq!(entries, vec![1, 2, 3, 4]);
        assert_eq!(exhaustion, Exhaustion::ShortPage);
    }

    #[test]
    fn test_empty_page_after_full_page() {
        let (entries, exhaustion) = collect_pages(LIMITS, |page, _| {
            Ok(if page == 1 { vec![1, 2, 3] } else { Vec::new() })
        })
        .unwrap();

        assert_eq!(entries, vec![1, 2, 3]);
        assert_eq!(exhaustion, Exhaustion::ShortPage);
    }

    #[test]
    fn test_stops_at_page_ceiling() {
        let mut pages = 0;
        let (entries, exhaustion) = collect_pages(LIMITS, |page, _| {
            pages += 1;
            Ok(vec![page; 3])
        })
        .unwrap();

        assert_eq!(pages, 4);
        assert_eq!(entries.len(), 12);
        assert_eq!(&entries[9..], &[4, 4, 4]);
        assert_eq!(exhaustion, Exhaustion::PageCeiling);
    }

    #[test]
    fn test_failure_discards_partial_results() {
        let result: Result<(Vec<u32>, Exhaustion)> = collect_pages(LIMITS, |page, _| {
            if page == 2 {
                Err(EztvError::MalformedResponse("boom".to_string()))
            } else {
                Ok(vec![1, 2, 3])
            }
        });

        assert!(matches!(result, Err(EztvError::MalformedResponse(_))));
    }
}
