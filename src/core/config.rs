/// Run configuration, loaded from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::corpus::{DEFAULT_MIN_TEXT_LENGTH, DEFAULT_MIN_WORD_LENGTH};
use crate::core::generator::{EndBias, DEFAULT_MAX_LENGTH_FACTOR};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one generation run. Every field is optional in the file.
///
/// ```ron
/// (
///     count: 25,
///     min_word_length: 4,
///     seed: Some(42),
///     end_bias: (late: 40.0),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JabberConfig {
    /// Number of words to generate.
    pub count: usize,
    /// Shorter training words are discarded.
    pub min_word_length: usize,
    /// Minimum amount of sample text, in characters.
    pub min_text_length: usize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Hard cap on generated length, as a multiple of the longest training word.
    pub max_length_factor: usize,
    pub end_bias: EndBias,
}

impl Default for JabberConfig {
    fn default() -> Self {
        Self {
            count: 10,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            seed: None,
            max_length_factor: DEFAULT_MAX_LENGTH_FACTOR,
            end_bias: EndBias::default(),
        }
    }
}

impl JabberConfig {
    /// Load and validate a config file.
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: JabberConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_word_length == 0 {
            return Err(ConfigError::Invalid("min_word_length must be at least 1".to_string()));
        }
        if self.max_length_factor == 0 {
            return Err(ConfigError::Invalid("max_length_factor must be at least 1".to_string()));
        }
        if !self.end_bias.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "end_bias needs finite non-negative early/late and growth >= 1, got {:?}",
                self.end_bias
            )));
        }
        Ok(())
    }
}
