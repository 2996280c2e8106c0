//! Cyrillic-to-Latin transliteration for cross-script search.

/// Fixed letter table; digraphs follow common romanization, hard and soft
/// signs are dropped.
const CYRILLIC_TO_LATIN: [(char, &str); 33] = [
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ё', "e"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('й', "i"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "shch"),
    ('ъ', ""),
    ('ы', "y"),
    ('ь', ""),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
];

/// Lowercase and map Cyrillic letters to Latin; other characters pass
/// through unchanged, so the result equals the input for pure-Latin text.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars().flat_map(|c| c.to_lowercase()) {
        match CYRILLIC_TO_LATIN.iter().find(|(cyr, _)| *cyr == ch) {
            Some((_, latin)) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_word() {
        assert_eq!(transliterate("украина"), "ukraina");
        assert_eq!(transliterate("мир"), "mir");
    }

    #[test]
    fn test_digraphs() {
        assert_eq!(transliterate("жизнь"), "zhizn");
        assert_eq!(transliterate("щука"), "shchuka");
    }

    #[test]
    fn test_signs_dropped() {
        assert_eq!(transliterate("объект"), "obekt");
    }

    #[test]
    fn test_latin_passthrough() {
        assert_eq!(transliterate("ukraine"), "ukraine");
        assert_eq!(transliterate("Ukraine"), "ukraine");
    }

    #[test]
    fn test_mixed_script() {
        assert_eq!(transliterate("News-новости"), "news-novosti");
    }
}
