use chrono::Utc;
use feed_rs::model::Entry;
use html_escape::decode_html_entities;
use regex::Regex;

use crate::domain::NewsItem;

/// Strip the query string from an entry link; the remainder is the item's
/// deduplication key.
pub fn canonicalize_link(link: &str) -> String {
    link.split('?').next().unwrap_or_default().trim().to_string()
}

/// Converts one parsed feed entry into a canonical [`NewsItem`].
///
/// Malformed entries are skipped (`None`), never propagated; sibling
/// entries in the same feed are unaffected.
#[derive(Clone)]
pub struct Normalizer {
    tag_re: Regex,
    ws_re: Regex,
    img_re: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            tag_re: Regex::new(r"<[^>]*>").expect("valid tag regex"),
            ws_re: Regex::new(r"\s+").expect("valid whitespace regex"),
            img_re: Regex::new(r#"(?i)<img[^>]+src="([^"]+)""#).expect("valid img regex"),
        }
    }

    pub fn normalize(&self, source: &str, entry: Entry) -> Option<NewsItem> {
        let link = entry
            .links
            .first()
            .map(|l| canonicalize_link(&l.href))
            .unwrap_or_default();
        if link.is_empty() {
            return None;
        }

        let raw_summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.clone())
            .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
            .unwrap_or_default();

        let image = self.first_image(&entry, &raw_summary);
        let published = entry.published.or(entry.updated).unwrap_or_else(Utc::now);

        let title = self.clean_html(entry.title.as_ref().map(|t| t.content.as_str()).unwrap_or(""));
        let description = self.clean_html(&raw_summary);

        let mut item = NewsItem::new(source, link, published);
        item.orig_title = title.clone();
        item.orig_description = description.clone();
        item.title = title;
        item.description = description;
        item.image = image;
        Some(item)
    }

    /// Markup-strip, entity-decode, collapse whitespace, trim.
    fn clean_html(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let stripped = self.tag_re.replace_all(raw, " ");
        let decoded = decode_html_entities(stripped.as_ref());
        self.ws_re.replace_all(decoded.as_ref(), " ").trim().to_string()
    }

    /// Representative illustration, by fixed priority: media attachment,
    /// then image-typed link relation, then the first `<img>` in the raw
    /// description markup.
    fn first_image(&self, entry: &Entry, raw_summary: &str) -> Option<String> {
        for media in &entry.media {
            for content in &media.content {
                if let Some(url) = &content.url {
                    return Some(url.to_string());
                }
            }
        }
        for media in &entry.media {
            if let Some(thumbnail) = media.thumbnails.first() {
                return Some(thumbnail.image.uri.clone());
            }
        }
        for link in &entry.links {
            let is_image = link
                .media_type
                .as_deref()
                .map(|t| t.starts_with("image"))
                .unwrap_or(false);
            if is_image {
                return Some(link.href.clone());
            }
        }
        self.img_re
            .captures(raw_summary)
            .map(|captures| captures[1].to_string())
    }
}
