//! Keyword dictionaries and matching shared by the classifiers.
//!
//! Every dictionary is a plain `&'static [&str]` so declaration order is the
//! iteration order. Matching runs against a lowercased copy of the input; Thai
//! has no letter case, so lowercasing only affects the English entries.
//!
//! Thai is written without spaces between words, so Thai keywords match as
//! plain substrings. ASCII keywords must sit on word boundaries: "love" does
//! not match "glove", "lying" does not match "flying".

/// Lowercased copy of the input that every classifier matches against.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// True if `word` occurs in `normalized` under the rules above.
pub fn contains_keyword(normalized: &str, word: &str) -> bool {
    if !word.is_ascii() {
        return normalized.contains(word);
    }
    normalized.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = normalized[..start].chars().next_back();
        let after = normalized[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A named, ordered list of trigger keywords.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

impl KeywordSet {
    pub const fn new(name: &'static str, words: &'static [&'static str]) -> Self {
        Self { name, words }
    }

    /// Number of distinct keywords that occur in `normalized`.
    ///
    /// A keyword repeated in the text still counts once.
    pub fn count_in(&self, normalized: &str) -> usize {
        self.words
            .iter()
            .filter(|word| contains_keyword(normalized, word))
            .count()
    }

    /// True if any keyword occurs in `normalized`.
    pub fn matches(&self, normalized: &str) -> bool {
        self.words.iter().any(|word| contains_keyword(normalized, word))
    }
}
