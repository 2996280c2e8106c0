use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::colors::accent_for;

/// Canonical unit of aggregated content.
///
/// `link` is the deduplication key: two items with the same canonicalized
/// link are the same logical item. `id` is derived from the link, so
/// identity survives re-fetch across refresh cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub orig_title: String,
    pub orig_description: String,
    pub link: String,
    pub source: String,
    pub published: DateTime<Utc>,
    pub image: Option<String>,
    pub accent: String,
    #[serde(skip)]
    pub search_tokens: HashSet<String>,
}

impl NewsItem {
    pub fn new(source: &str, link: String, published: DateTime<Utc>) -> Self {
        let id = Self::generate_id(&link);
        let accent_seed = if link.is_empty() { source } else { &link };
        Self {
            id,
            title: String::new(),
            description: String::new(),
            orig_title: String::new(),
            orig_description: String::new(),
            accent: accent_for(accent_seed).to_string(),
            link,
            source: source.to_string(),
            published,
            image: None,
            search_tokens: HashSet::new(),
        }
    }

    /// Generate a deterministic ID from the canonicalized link.
    pub fn generate_id(link: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(link.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }

    /// Absolute timestamp for display, e.g. "05 Aug 2026, 14:03 UTC".
    pub fn format_published(&self) -> String {
        self.published.format("%d %b %Y, %H:%M UTC").to_string()
    }

    /// Humanized age relative to `now`.
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        let seconds = (now - self.published).num_seconds().max(0);
        if seconds < 60 {
            return "только что".to_string();
        }
        let minutes = seconds / 60;
        if minutes < 60 {
            return format!("{} мин назад", minutes);
        }
        let hours = minutes / 60;
        if hours < 24 {
            return format!("{} ч назад", hours);
        }
        format!("{} дн назад", hours / 24)
    }
}
