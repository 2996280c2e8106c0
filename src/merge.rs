//! Merging and deduplication of per-source item lists.

use std::collections::HashSet;

use crate::domain::NewsItem;

/// Flatten per-source lists into one globally ordered, link-deduplicated
/// sequence, newest first.
///
/// Sorting happens before deduplication, so the surviving instance of a
/// republished or cross-posted link is always the most recently published
/// one. Ties on `published` are broken by `id` to keep merges
/// deterministic.
pub fn merge(per_source: Vec<Vec<NewsItem>>) -> Vec<NewsItem> {
    let mut all: Vec<NewsItem> = per_source.into_iter().flatten().collect();

    all.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut seen: HashSet<String> = HashSet::with_capacity(all.len());
    all.retain(|item| seen.insert(item.link.clone()));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn item(link: &str, minutes_ago: i64) -> NewsItem {
        let mut item = NewsItem::new(
            "Test Source",
            link.to_string(),
            Utc::now() - Duration::minutes(minutes_ago),
        );
        item.title = format!("{} ({}m)", link, minutes_ago);
        item
    }

    #[test]
    fn test_sorted_descending_by_published() {
        let merged = merge(vec![
            vec![item("https://example.com/a", 30), item("https://example.com/b", 5)],
            vec![item("https://example.com/c", 10)],
        ]);

        assert_eq!(merged.len(), 3);
        for window in merged.windows(2) {
            assert!(window[0].published >= window[1].published);
        }
    }

    #[test]
    fn test_duplicate_link_keeps_newest() {
        let merged = merge(vec![
            vec![item("https://example.com/shared", 60)],
            vec![item("https://example.com/shared", 5)],
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "https://example.com/shared (5m)");
    }

    #[test]
    fn test_dedup_across_many_sources() {
        let merged = merge(vec![
            vec![item("https://example.com/a", 1), item("https://example.com/b", 2)],
            vec![item("https://example.com/b", 3), item("https://example.com/c", 4)],
            vec![item("https://example.com/a", 5)],
        ]);

        let links: Vec<&str> = merged.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c"
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(merge(Vec::new()).is_empty());
        assert!(merge(vec![Vec::new(), Vec::new()]).is_empty());
    }
}
