use rustc_hash::FxHashSet;
use std::fmt;

use crate::schema::symbol::Symbol;

/// A normalized word: lowercase letters, combining marks, hyphens and
/// apostrophes. Used both for training input and generated output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(String);

/// Deduplicated training words.
pub type WordSet = FxHashSet<Word>;

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Word(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.0.chars()
    }

    /// The word framed by two start markers and one end marker:
    /// `[Start, Start, c1, .., cn, End]`.
    pub fn padded(&self) -> Vec<Symbol> {
        let mut padded = Vec::with_capacity(self.0.len() + 3);
        padded.push(Symbol::Start);
        padded.push(Symbol::Start);
        padded.extend(self.0.chars().map(Symbol::Char));
        padded.push(Symbol::End);
        padded
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Word(s.to_string())
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Word(s)
    }
}

impl FromIterator<char> for Word {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Word(iter.into_iter().collect())
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_frames_word_with_markers() {
        let padded = Word::from("cat").padded();
        assert_eq!(
            padded,
            vec![
                Symbol::Start,
                Symbol::Start,
                Symbol::Char('c'),
                Symbol::Char('a'),
                Symbol::Char('t'),
                Symbol::End,
            ]
        );
    }

    #[test]
    fn len_counts_characters() {
        let word = Word::from("café");
        assert_eq!(word.len(), 4);
        assert!(word.as_str().len() > 4);
    }
}
