/// End-to-end model building and word generation tests.

use jabberwock::core::generator::{generate, WordGenerator};
use jabberwock::core::model::{build_model, ModelError};
use jabberwock::schema::symbol::{Context, Symbol};
use jabberwock::schema::word::{Word, WordSet};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn word_set(list: &[&str]) -> WordSet {
    list.iter().map(|w| Word::from(*w)).collect()
}

#[test]
fn cat_car_can_scenario() {
    let words = word_set(&["cat", "car", "can"]);
    let model = build_model(&words).unwrap();
    let transitions = model.transitions();

    let start = transitions.get(&Context::START).unwrap();
    assert_eq!(start.weight(Symbol::Char('c')), 3);
    assert_eq!(start.len(), 1);

    let ca = transitions.get(&Context::from(('c', 'a'))).unwrap();
    assert_eq!(ca.weight(Symbol::Char('t')), 1);
    assert_eq!(ca.weight(Symbol::Char('r')), 1);
    assert_eq!(ca.weight(Symbol::Char('n')), 1);
    assert_eq!(ca.len(), 3);

    let generator = WordGenerator::from_model(&model);
    let mut rng = StdRng::seed_from_u64(42);
    let generated = generate(transitions, model.lengths(), 5, &mut rng);
    assert_eq!(generated.len(), 5);
    for word in &generated {
        assert!(!word.is_empty());
        assert!(word.len() <= generator.max_length());
        assert!(
            word.chars().all(|c| "acnrt".contains(c)),
            "unexpected character in '{}'",
            word
        );
    }
}

#[test]
fn empty_set_is_empty_corpus() {
    let words = WordSet::default();
    assert_eq!(build_model(&words).unwrap_err(), ModelError::EmptyCorpus);
}

#[test]
fn every_padded_context_is_present() {
    let words = word_set(&["slithy", "toves", "gyre", "gimble", "wabe", "o'clock", "well-known"]);
    let model = build_model(&words).unwrap();

    for word in &words {
        let padded = word.padded();
        for window in padded.windows(3) {
            let context = Context(window[0], window[1]);
            let dist = model
                .transitions()
                .get(&context)
                .unwrap_or_else(|| panic!("missing context {} from '{}'", context, word));
            assert!(dist.weight(window[2]) > 0);
            assert!(dist.total() > 0);
        }
    }
}

#[test]
fn length_table_is_a_cdf() {
    let words = word_set(&["ape", "bat", "cod", "mole", "newt", "otter", "hippopotamus"]);
    let model = build_model(&words).unwrap();

    let values: Vec<f64> = model.lengths().iter().map(|(_, c)| c).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert!((values[values.len() - 1] - 1.0).abs() < 1e-12);
    let lengths: Vec<usize> = model.lengths().iter().map(|(l, _)| l).collect();
    assert_eq!(lengths, vec![3, 4, 5, 12]);
}

#[test]
fn seeded_generation_is_reproducible() {
    let words = word_set(&["brillig", "borogove", "mimsy", "outgrabe", "frumious", "vorpal"]);
    let model = build_model(&words).unwrap();

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(model.transitions(), model.lengths(), 25, &mut rng)
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}

#[test]
fn termination_bound_holds_for_many_seeds() {
    let words = word_set(&["abab", "baba", "abba", "baab", "aabb", "bbaa"]);
    let model = build_model(&words).unwrap();
    let generator = WordGenerator::from_model(&model).with_max_length_factor(2);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for word in generator.generate(20, &mut rng) {
            assert!(word.len() <= 8, "'{}' exceeds the cap", word);
        }
    }
}
