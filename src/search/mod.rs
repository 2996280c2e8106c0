//! Inverted token index with transliteration-aware conjunctive queries.

mod translit;

pub use translit::transliterate;

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;

use crate::domain::NewsItem;

/// Token index over merged items.
///
/// Postings map tokens to item positions. Beyond each item's literal
/// tokens, the transliterated form of every token is indexed as well, so a
/// Latin query finds Cyrillic items and the other way around. Queries are
/// conjunctive: every term must match through at least one of its
/// variants.
pub struct SearchIndex {
    token_re: Regex,
    postings: HashMap<String, BTreeSet<usize>>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self {
            token_re: Regex::new(r"[\w-]+").expect("valid token regex"),
            postings: HashMap::new(),
        }
    }

    /// Lowercase word tokens (letters, digits, underscore, hyphen).
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_re
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Rebuild the index from scratch over `items`, filling each item's
    /// token set when absent. Token sets are never updated incrementally.
    pub fn rebuild(&mut self, items: &mut [NewsItem]) {
        self.postings.clear();

        for (position, item) in items.iter_mut().enumerate() {
            if item.search_tokens.is_empty() {
                let mut tokens: HashSet<String> = HashSet::new();
                for field in [
                    &item.title,
                    &item.description,
                    &item.orig_title,
                    &item.orig_description,
                    &item.source,
                ] {
                    tokens.extend(self.tokenize(field));
                }
                item.search_tokens = tokens;
            }

            for token in &item.search_tokens {
                self.postings
                    .entry(token.clone())
                    .or_default()
                    .insert(position);
                let latin = transliterate(token);
                if !latin.is_empty() && latin != *token {
                    self.postings.entry(latin).or_default().insert(position);
                }
            }
        }
    }

    /// Variant sets for a query: one group per term, each holding the term
    /// and, when different, its transliteration. Empty for empty queries.
    pub fn query_groups(&self, query: &str) -> Vec<Vec<String>> {
        self.tokenize(query)
            .into_iter()
            .map(|term| {
                let mut variants = BTreeSet::new();
                let latin = transliterate(&term);
                if !latin.is_empty() && latin != term {
                    variants.insert(latin);
                }
                variants.insert(term);
                variants.into_iter().collect()
            })
            .collect()
    }

    /// Positions matching at least one variant of every group, ascending
    /// (i.e. preserving the underlying item order). A group whose variants
    /// all miss the index short-circuits to no results.
    pub fn matching_positions(&self, groups: &[Vec<String>]) -> Vec<usize> {
        let mut candidates: Option<BTreeSet<usize>> = None;

        for variants in groups {
            let mut variant_matches: BTreeSet<usize> = BTreeSet::new();
            for token in variants {
                if let Some(postings) = self.postings.get(token) {
                    variant_matches.extend(postings.iter().copied());
                }
            }
            if variant_matches.is_empty() {
                return Vec::new();
            }

            let narrowed = match candidates {
                None => variant_matches,
                Some(prev) => prev.intersection(&variant_matches).copied().collect(),
            };
            if narrowed.is_empty() {
                return Vec::new();
            }
            candidates = Some(narrowed);
        }

        candidates
            .map(|set| set.into_iter().collect())
            .unwrap_or_default()
    }
}
