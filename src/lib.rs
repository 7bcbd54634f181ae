//! Jabberwock — pronounceable pseudo-words from sample text.
//!
//! Trains a second-order character Markov model on the unique words of a
//! corpus, together with a flattened word-length distribution, and walks the
//! model to emit new words that sound like they belong to the source text.

pub mod core;
pub mod schema;

pub use crate::core::generator::{generate, EndBias, WordGenerator};
pub use crate::core::model::{build_model, LengthWeights, ModelError, TransitionTable, WordModel};
pub use crate::schema::word::{Word, WordSet};
