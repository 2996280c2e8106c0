//! Accent color palette for rendered items.

use sha2::{Digest, Sha256};

/// Palette the presentation layer draws item accents from.
pub const ACCENT_PALETTE: [&str; 6] = [
    "#d62828", "#003049", "#f77f00", "#2a9d8f", "#780116", "#0a2463",
];

/// Pick a palette color for a seed string.
///
/// The choice is a pure function of the seed, so the same item keeps the
/// same accent across refreshes and across processes.
pub fn accent_for(seed: &str) -> &'static str {
    let digest = Sha256::digest(seed.as_bytes());
    ACCENT_PALETTE[digest[0] as usize % ACCENT_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_deterministic() {
        let a = accent_for("https://example.com/article");
        let b = accent_for("https://example.com/article");
        assert_eq!(a, b);
    }

    #[test]
    fn test_accent_from_palette() {
        for seed in ["", "x", "https://example.com/a", "BBC News"] {
            assert!(ACCENT_PALETTE.contains(&accent_for(seed)));
        }
    }

    #[test]
    fn test_accent_varies_with_seed() {
        let accents: std::collections::HashSet<_> = (0..64)
            .map(|n| accent_for(&format!("https://example.com/{}", n)))
            .collect();
        assert!(accents.len() > 1);
    }
}
