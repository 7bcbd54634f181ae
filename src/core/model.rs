/// Word model construction — second-order transition counts and the
/// flattened word-length distribution.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::schema::symbol::{Context, Symbol};
use crate::schema::word::Word;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("no training words were supplied; add more sample text or lower the minimum word length")]
    EmptyCorpus,
    #[error("training words must contain at least one character")]
    EmptyWord,
}

/// Observed successors of one context, with raw counts.
///
/// Kept as counts rather than probabilities; normalization happens when
/// sampling. Ordered by symbol so sampling never depends on hash order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    counts: BTreeMap<Symbol, u32>,
}

impl Distribution {
    pub fn add(&mut self, next: Symbol, count: u32) {
        *self.counts.entry(next).or_insert(0) += count;
    }

    /// Raw count for `next`, 0 if never observed.
    pub fn weight(&self, next: Symbol) -> u32 {
        self.counts.get(&next).copied().unwrap_or(0)
    }

    pub fn end_weight(&self) -> u32 {
        self.weight(Symbol::End)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }
}

/// Second-order character model: context → successor counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    contexts: FxHashMap<Context, Distribution>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `next` following `context`.
    pub fn observe(&mut self, context: Context, next: Symbol) {
        self.contexts.entry(context).or_default().add(next, 1);
    }

    /// Count every transition in `word`, framed by start and end markers.
    pub fn observe_word(&mut self, word: &Word) {
        for window in word.padded().windows(3) {
            self.observe(Context(window[0], window[1]), window[2]);
        }
    }

    pub fn get(&self, context: &Context) -> Option<&Distribution> {
        self.contexts.get(context)
    }

    /// Number of distinct contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Context, &Distribution)> {
        self.contexts.iter()
    }

    /// Fold another table's counts into this one. Counts are summed, so
    /// tables built from disjoint word shards merge into the full table.
    pub fn merge(&mut self, other: &TransitionTable) {
        for (context, dist) in &other.contexts {
            let target = self.contexts.entry(*context).or_default();
            for (next, count) in dist.iter() {
                target.add(next, count);
            }
        }
    }
}

/// Cumulative distribution over word lengths.
///
/// Entries are ascending by length, cumulative values are non-decreasing,
/// and the last value is exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthWeights {
    cumulative: Vec<(usize, f64)>,
}

impl LengthWeights {
    /// Build from per-length word counts.
    ///
    /// Each count is normalized by the total, square-rooted to flatten the
    /// curve toward rare lengths, re-normalized, and accumulated.
    /// Returns `None` when there are no counts.
    pub fn from_counts(counts: &BTreeMap<usize, u32>) -> Option<Self> {
        let total: u64 = counts.values().map(|&c| c as u64).sum();
        if total == 0 {
            return None;
        }

        let flattened: Vec<(usize, f64)> = counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&len, &count)| (len, (count as f64 / total as f64).sqrt()))
            .collect();
        let norm: f64 = flattened.iter().map(|(_, v)| v).sum();

        let mut running = 0.0;
        let mut cumulative: Vec<(usize, f64)> = flattened
            .into_iter()
            .map(|(len, v)| {
                running += v / norm;
                (len, running.min(1.0))
            })
            .collect();

        // Pin the tail so sampling with u close to 1.0 always lands.
        if let Some(last) = cumulative.last_mut() {
            last.1 = 1.0;
        }

        Some(Self { cumulative })
    }

    /// Inverse-CDF lookup: the smallest length whose cumulative weight is
    /// at least `u`. `u` is expected in [0, 1).
    pub fn sample(&self, u: f64) -> usize {
        let idx = self.cumulative.partition_point(|&(_, c)| c < u);
        self.cumulative[idx.min(self.cumulative.len() - 1)].0
    }

    /// Flattened (non-cumulative) probability of `length`.
    pub fn probability(&self, length: usize) -> f64 {
        match self.cumulative.binary_search_by_key(&length, |&(l, _)| l) {
            Ok(0) => self.cumulative[0].1,
            Ok(i) => self.cumulative[i].1 - self.cumulative[i - 1].1,
            Err(_) => 0.0,
        }
    }

    /// Cumulative weight of all lengths up to and including `length`.
    pub fn cumulative(&self, length: usize) -> f64 {
        let idx = self.cumulative.partition_point(|&(l, _)| l <= length);
        if idx == 0 {
            0.0
        } else {
            self.cumulative[idx - 1].1
        }
    }

    pub fn min_length(&self) -> usize {
        self.cumulative[0].0
    }

    pub fn max_length(&self) -> usize {
        self.cumulative[self.cumulative.len() - 1].0
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.cumulative.iter().copied()
    }
}

/// Summary figures for a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub words: usize,
    pub contexts: usize,
    pub transitions: usize,
    pub observations: u64,
    pub min_length: usize,
    pub max_length: usize,
}

/// A trained model: both tables, immutable once built.
#[derive(Debug, Clone)]
pub struct WordModel {
    transitions: TransitionTable,
    lengths: LengthWeights,
    words: usize,
}

impl WordModel {
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn lengths(&self) -> &LengthWeights {
        &self.lengths
    }

    /// Number of training words the model was built from.
    pub fn word_count(&self) -> usize {
        self.words
    }

    pub fn stats(&self) -> ModelStats {
        let mut transitions = 0;
        let mut observations = 0;
        for (_, dist) in self.transitions.iter() {
            transitions += dist.len();
            observations += dist.total();
        }
        ModelStats {
            words: self.words,
            contexts: self.transitions.len(),
            transitions,
            observations,
            min_length: self.lengths.min_length(),
            max_length: self.lengths.max_length(),
        }
    }

    pub fn into_parts(self) -> (TransitionTable, LengthWeights) {
        (self.transitions, self.lengths)
    }
}

/// Accumulates training words into a `WordModel`.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    transitions: TransitionTable,
    length_counts: BTreeMap<usize, u32>,
    words: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one training word. Words are expected to be unique; feeding a
    /// duplicate counts it twice.
    pub fn add_word(&mut self, word: &Word) -> Result<(), ModelError> {
        let len = word.len();
        if len == 0 {
            return Err(ModelError::EmptyWord);
        }
        self.transitions.observe_word(word);
        *self.length_counts.entry(len).or_insert(0) += 1;
        self.words += 1;
        Ok(())
    }

    pub fn add_words<'a, I>(&mut self, words: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = &'a Word>,
    {
        for word in words {
            self.add_word(word)?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<WordModel, ModelError> {
        let lengths = LengthWeights::from_counts(&self.length_counts).ok_or(ModelError::EmptyCorpus)?;
        let model = WordModel {
            transitions: self.transitions,
            lengths,
            words: self.words,
        };

        let stats = model.stats();
        log::info!(
            "Model built: {} words, {} contexts, {} transitions, lengths {}..={}",
            stats.words,
            stats.contexts,
            stats.transitions,
            stats.min_length,
            stats.max_length
        );

        Ok(model)
    }
}

/// Build both tables from a set of unique training words.
pub fn build_model<'a, I>(words: I) -> Result<WordModel, ModelError>
where
    I: IntoIterator<Item = &'a Word>,
{
    let mut builder = ModelBuilder::new();
    builder.add_words(words)?;
    builder.build()
}
