//! WASM bindings for jabberwock — powers the interactive web demo.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use jabberwock::core::config::JabberConfig;
use jabberwock::core::corpus::parse_words;
use jabberwock::core::generator::WordGenerator;
use jabberwock::core::model::{build_model, WordModel};

// ---------------------------------------------------------------------------
// Embedded sample text — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const JABBERWOCKY: &str = include_str!("../../data/jabberwocky.txt");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct LengthEntry {
    length: usize,
    cumulative: f64,
}

// ---------------------------------------------------------------------------
// WordForge — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct WordForge {
    model: WordModel,
    config: JabberConfig,
}

#[wasm_bindgen]
impl WordForge {
    /// Train a model on arbitrary sample text.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, min_word_length: usize) -> Result<WordForge, JsError> {
        let config = JabberConfig {
            min_word_length,
            ..JabberConfig::default()
        };
        Self::train(text, config)
    }

    /// Train a model on the built-in sample poem.
    pub fn sample() -> Result<WordForge, JsError> {
        Self::train(data::JABBERWOCKY, JabberConfig::default())
    }

    /// Generate `count` words from `seed`. Returns a JSON array of strings.
    pub fn generate(&self, count: usize, seed: u64) -> Result<String, JsError> {
        let words = self.words(count, seed);
        serde_json::to_string(&words).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Model summary as JSON.
    pub fn stats(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.model.stats())
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Cumulative length table as a JSON array of `{length, cumulative}`.
    pub fn length_table(&self) -> Result<String, JsError> {
        let entries: Vec<LengthEntry> = self
            .model
            .lengths()
            .iter()
            .map(|(length, cumulative)| LengthEntry { length, cumulative })
            .collect();
        serde_json::to_string(&entries)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Adjust the hard length cap used by `generate`.
    pub fn set_max_length_factor(&mut self, factor: usize) {
        self.config.max_length_factor = factor.max(1);
    }
}

impl WordForge {
    fn train(text: &str, config: JabberConfig) -> Result<WordForge, JsError> {
        config
            .validate()
            .map_err(|e| JsError::new(&format!("Config error: {e}")))?;
        let words = parse_words(text, config.min_word_length);
        let model =
            build_model(&words).map_err(|e| JsError::new(&format!("Training error: {e}")))?;
        Ok(WordForge { model, config })
    }

    fn words(&self, count: usize, seed: u64) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        WordGenerator::from_model(&self.model)
            .with_end_bias(self.config.end_bias)
            .with_max_length_factor(self.config.max_length_factor)
            .generate(count, &mut rng)
            .into_iter()
            .map(|w| w.into_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forge() -> WordForge {
        match WordForge::sample() {
            Ok(forge) => forge,
            Err(_) => panic!("sample poem should train"),
        }
    }

    #[test]
    fn sample_trains_and_generates() {
        let forge = forge();
        let words = forge.words(8, 42);
        assert_eq!(words.len(), 8);
        assert!(words.iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn same_seed_same_words() {
        let forge = forge();
        assert_eq!(forge.words(10, 9), forge.words(10, 9));
    }
}
