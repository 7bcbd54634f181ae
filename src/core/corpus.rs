/// Corpus preparation — loading sample text and reducing it to a set of
/// unique, normalized training words.

use std::path::Path;
use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

use crate::schema::word::{Word, WordSet};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("insufficient sample text: {found} characters loaded, at least {required} required")]
    InsufficientText { found: usize, required: usize },
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Default minimum word length kept for training.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Default minimum amount of sample text, in characters.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 2000;

/// Characters kept inside words besides letters and nonspacing marks.
const WORD_PUNCTUATION: &[char] = &['\'', '-'];

/// Read every file in `paths` and join the contents with blank lines.
///
/// Missing files are skipped with a warning; any other read failure is
/// returned.
pub fn load_texts<P: AsRef<Path>>(paths: &[P]) -> Result<String, CorpusError> {
    let mut texts = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loaded '{}': {} chars", path.display(), text.chars().count());
                texts.push(text);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("File not found, skipping: '{}'", path.display());
            }
            Err(source) => {
                return Err(CorpusError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        }
    }

    Ok(texts.join("\n\n"))
}

/// Check that `text` holds at least `min_chars` characters.
/// Returns the character count.
pub fn require_min_text(text: &str, min_chars: usize) -> Result<usize, CorpusError> {
    let found = text.chars().count();
    if found < min_chars {
        return Err(CorpusError::InsufficientText {
            found,
            required: min_chars,
        });
    }
    Ok(found)
}

/// Reduce raw text to unique words of at least `min_length` characters.
///
/// Text is NFKD-normalized (diacritics become separate nonspacing marks),
/// lowercased as a whole string (so a word-final sigma becomes `ς`), curly
/// single quotes become `'`, and runs of two or more hyphens become word
/// breaks. Anything other than a letter (`L*`), nonspacing mark (`Mn`),
/// apostrophe or hyphen is a word break. Leading and trailing hyphens
/// are trimmed from each word.
pub fn parse_words(text: &str, min_length: usize) -> WordSet {
    let normalized: String = text.nfkd().collect();
    let cleaned: String = normalized.to_lowercase().chars().map(fix_quote).collect();
    let cleaned = break_hyphen_runs(&cleaned);

    let cleaned: String = cleaned
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();

    let mut words = WordSet::default();
    for raw in cleaned.split_whitespace() {
        let trimmed = raw.trim_matches('-');
        if trimmed.chars().count() >= min_length {
            words.insert(Word::from(trimmed));
        }
    }

    log::info!("Parsed {} unique words (min length {})", words.len(), min_length);
    words
}

fn fix_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        other => other,
    }
}

fn is_word_char(c: char) -> bool {
    if WORD_PUNCTUATION.contains(&c) {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::NonspacingMark
    )
}

/// Replace every run of two or more hyphens with spaces.
fn break_hyphen_runs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '-' {
            let start = i;
            while i < chars.len() && chars[i] == '-' {
                i += 1;
            }
            let run = i - start;
            let fill = if run >= 2 { ' ' } else { '-' };
            result.extend(std::iter::repeat(fill).take(run));
        } else {
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}
