/// Word generation — length-aware weighted walks over the transition table.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::model::{LengthWeights, TransitionTable, WordModel};
use crate::schema::symbol::{Context, Symbol};
use crate::schema::word::Word;

/// Hard length cap, as a multiple of the longest training word.
pub const DEFAULT_MAX_LENGTH_FACTOR: usize = 3;

/// Largest overshoot exponent applied by `EndBias::growth`.
const MAX_GROWTH_STEPS: usize = 64;

/// Reshapes the observed word-end weight around the sampled target length.
///
/// With `n` the current length, `L` the target and `w` the observed end count:
/// - `n < L`: `w * early * n / L`, so endings are rare and get likelier
///   as the word grows;
/// - `n >= L`: `w * late * growth^(n - L)`;
/// - `n > L` with no observed ending in this context: an ending is injected
///   with weight `early * (n - L) * others`, where `others` is the summed
///   weight of every non-end successor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndBias {
    pub early: f64,
    pub late: f64,
    pub growth: f64,
}

impl Default for EndBias {
    fn default() -> Self {
        Self {
            early: 0.05,
            late: 25.0,
            growth: 2.0,
        }
    }
}

impl EndBias {
    /// The weight to give the end marker at this step.
    pub fn end_weight(&self, observed: u32, others: u64, len: usize, target: usize) -> f64 {
        let observed = observed as f64;
        let target = target.max(1);

        if len < target {
            return observed * self.early * (len as f64 / target as f64);
        }

        let overshoot = len - target;
        if observed > 0.0 {
            observed * self.late * self.growth.powi(overshoot.min(MAX_GROWTH_STEPS) as i32)
        } else {
            self.early * overshoot as f64 * others as f64
        }
    }

    pub fn is_valid(&self) -> bool {
        self.early.is_finite()
            && self.late.is_finite()
            && self.growth.is_finite()
            && self.early >= 0.0
            && self.late >= 0.0
            && self.growth >= 1.0
    }
}

/// Emits new words from a trained model.
///
/// Holds only shared references to the tables; every call draws from the
/// random source it is handed, so nothing carries over between calls.
#[derive(Debug, Clone, Copy)]
pub struct WordGenerator<'a> {
    transitions: &'a TransitionTable,
    lengths: &'a LengthWeights,
    end_bias: EndBias,
    max_length: usize,
}

impl<'a> WordGenerator<'a> {
    pub fn new(transitions: &'a TransitionTable, lengths: &'a LengthWeights) -> Self {
        Self {
            transitions,
            lengths,
            end_bias: EndBias::default(),
            max_length: lengths.max_length().saturating_mul(DEFAULT_MAX_LENGTH_FACTOR),
        }
    }

    pub fn from_model(model: &'a WordModel) -> Self {
        Self::new(model.transitions(), model.lengths())
    }

    pub fn with_end_bias(mut self, end_bias: EndBias) -> Self {
        self.end_bias = end_bias;
        self
    }

    /// Cap generated words at `factor` times the longest training word.
    pub fn with_max_length_factor(mut self, factor: usize) -> Self {
        self.max_length = self.lengths.max_length().saturating_mul(factor.max(1));
        self
    }

    /// No generated word is longer than this.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Generate a single word.
    ///
    /// Samples a target length from the length table, then walks the chain
    /// from the start context until the end marker is drawn, the context
    /// has never been seen, or the hard length cap is hit.
    pub fn generate_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        let target = self.lengths.sample(rng.gen::<f64>());

        let mut context = Context::START;
        let mut word = String::new();
        let mut len = 0;

        while len < self.max_length {
            match self.pick_next(context, len, target, rng) {
                Symbol::Char(c) => {
                    word.push(c);
                    len += 1;
                    context = context.advance(Symbol::Char(c));
                }
                Symbol::End | Symbol::Start => break,
            }
        }

        Word::new(word)
    }

    /// Generate exactly `count` words.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Word> {
        self.words(rng).take(count).collect()
    }

    /// Unbounded lazy stream of words drawn from `rng`.
    pub fn words<'r, R: Rng + ?Sized>(&self, rng: &'r mut R) -> Words<'a, 'r, R> {
        Words {
            generator: *self,
            rng,
        }
    }

    /// Choose the next symbol for `context`.
    fn pick_next<R: Rng + ?Sized>(
        &self,
        context: Context,
        len: usize,
        target: usize,
        rng: &mut R,
    ) -> Symbol {
        let Some(dist) = self.transitions.get(&context) else {
            log::debug!("unseen context {}, ending word at length {}", context, len);
            return Symbol::End;
        };

        let observed_end = dist.end_weight();
        let others = dist.total() - observed_end as u64;
        let end = self.end_bias.end_weight(observed_end, others, len, target);

        let mut symbols = Vec::with_capacity(dist.len() + 1);
        let mut weights = Vec::with_capacity(dist.len() + 1);
        for (symbol, count) in dist.iter() {
            if symbol != Symbol::End {
                symbols.push(symbol);
                weights.push(count as f64);
            }
        }
        if end > 0.0 {
            symbols.push(Symbol::End);
            weights.push(end);
        }

        // Only an ending was ever observed here, and it is currently suppressed.
        if symbols.is_empty() {
            return Symbol::End;
        }

        match WeightedIndex::new(&weights) {
            Ok(index) => symbols[index.sample(rng)],
            Err(e) => {
                log::debug!("invalid weights for context {}: {}", context, e);
                Symbol::End
            }
        }
    }
}

/// Iterator returned by `WordGenerator::words`.
pub struct Words<'a, 'r, R: ?Sized> {
    generator: WordGenerator<'a>,
    rng: &'r mut R,
}

impl<R: Rng + ?Sized> Iterator for Words<'_, '_, R> {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        Some(self.generator.generate_word(&mut *self.rng))
    }
}

/// Generate `count` words from the two tables with default settings.
pub fn generate<R: Rng + ?Sized>(
    transitions: &TransitionTable,
    lengths: &LengthWeights,
    count: usize,
    rng: &mut R,
) -> Vec<Word> {
    WordGenerator::new(transitions, lengths).generate(count, rng)
}
