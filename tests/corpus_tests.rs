/// Corpus-to-words pipeline tests against the sample text fixture.

use jabberwock::core::config::JabberConfig;
use jabberwock::core::corpus::{load_texts, parse_words, require_min_text, CorpusError};
use jabberwock::core::generator::WordGenerator;
use jabberwock::core::model::build_model;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FIXTURE: &str = "tests/fixtures/sample_corpus.txt";

#[test]
fn fixture_passes_text_gate() {
    let text = load_texts(&[FIXTURE]).unwrap();
    let chars = require_min_text(&text, JabberConfig::default().min_text_length).unwrap();
    assert!(chars >= 2000);
}

#[test]
fn poem_alone_is_too_short() {
    let text = load_texts(&["data/jabberwocky.txt"]).unwrap();
    assert!(matches!(
        require_min_text(&text, 2000),
        Err(CorpusError::InsufficientText { .. })
    ));
}

#[test]
fn multiple_files_are_joined() {
    let single = load_texts(&[FIXTURE]).unwrap();
    let double = load_texts(&[FIXTURE, FIXTURE]).unwrap();
    assert_eq!(double.chars().count(), single.chars().count() * 2 + 2);
}

#[test]
fn fixture_words_are_clean() {
    let text = load_texts(&[FIXTURE]).unwrap();
    let words = parse_words(&text, 3);

    assert!(words.iter().any(|w| w.as_str() == "jabberwock"));
    assert!(words.iter().any(|w| w.as_str() == "snicker-snack"));
    assert!(words.iter().any(|w| w.as_str() == "'twas"));
    assert!(words.iter().all(|w| w.len() >= 3));
    assert!(words
        .iter()
        .all(|w| w.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')));
    assert!(words.iter().all(|w| w.as_str() == w.as_str().to_lowercase()));
}

#[test]
fn fixture_round_trip_generation() {
    let text = load_texts(&[FIXTURE]).unwrap();
    let words = parse_words(&text, 3);
    let model = build_model(&words).unwrap();
    assert_eq!(model.word_count(), words.len());

    let generator = WordGenerator::from_model(&model);
    let mut rng = StdRng::seed_from_u64(2024);
    let generated = generator.generate(100, &mut rng);
    assert_eq!(generated.len(), 100);
    assert!(generated.iter().all(|w| !w.is_empty() && w.len() <= generator.max_length()));

    let alphabet: std::collections::BTreeSet<char> = words.iter().flat_map(|w| w.chars()).collect();
    assert!(generated.iter().all(|w| w.chars().all(|c| alphabet.contains(&c))));
}
