//! Season and episode selection
//!
//! Works over anything addressable by a (season, episode) pair, which covers
//! both show episodes and episode torrents. Source order is preserved.

/// An item identified by a season and an episode number
pub trait EpisodeKey {
    fn season(&self) -> u32;
    fn episode(&self) -> u32;

    fn is_episode(&self, season: u32, episode: u32) -> bool {
        self.season() == season && self.episode() == episode
    }
}

/// Returns the first item matching `(season, episode)`
pub fn find_episode<T: EpisodeKey>(items: &[T], season: u32, episode: u32) -> Option<&T> {
    items.iter().find(|item| item.is_episode(season, episode))
}

/// Keeps every item matching `(season, episode)`
pub fn filter_episode<T: EpisodeKey>(items: Vec<T>, season: u32, episode: u32) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.is_episode(season, episode))
        .collect()
}

/// Keeps every item of `season`
pub fn filter_season<T: EpisodeKey>(items: Vec<T>, season: u32) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.season() == season)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u32, u32, &'static str);

    impl EpisodeKey for Item {
        fn season(&self) -> u32 {
            self.0
        }

        fn episode(&self) -> u32 {
            self.1
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item(2, 1, "a"),
            Item(1, 2, "b"),
            Item(1, 1, "c"),
            Item(2, 2, "d"),
            Item(1, 1, "e"),
        ]
    }

    #[test]
    fn test_find_episode_first_match_wins() {
        let items = items();
        assert_eq!(find_episode(&items, 1, 1), Some(&Item(1, 1, "c")));
        assert_eq!(find_episode(&items, 2, 1), Some(&Item(2, 1, "a")));
        assert_eq!(find_episode(&items, 3, 1), None);
    }

    #[test]
    fn test_filter_episode_keeps_all_matches_in_order() {
        let matched = filter_episode(items(), 1, 1);
        assert_eq!(matched, vec![Item(1, 1, "c"), Item(1, 1, "e")]);
        assert!(filter_episode(items(), 5, 5).is_empty());
    }

    #[test]
    fn test_filter_season_preserves_order() {
        let season = filter_season(items(), 1);
        assert_eq!(
            season,
            vec![Item(1, 2, "b"), Item(1, 1, "c"), Item(1, 1, "e")]
        );
        assert!(filter_season(items(), 5).is_empty());
    }
}
