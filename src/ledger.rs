use crate::config::LedgerBounds;
use crate::corpus::Corpus;
use std::collections::{HashMap, HashSet};

/// Weight every word starts with before it is ever mistyped
pub const BASELINE_WEIGHT: u32 = 1;

/// Per-word difficulty weights for the lifetime of one run.
///
/// Tracked weights always stay within `[min_range, abs_limit]`. Words that
/// were never mistyped are not tracked and weigh [`BASELINE_WEIGHT`].
#[derive(Debug, Clone)]
pub struct MistakeLedger {
    bounds: LedgerBounds,
    vocabulary: HashSet<String>,
    weights: HashMap<String, u32>,
}

impl MistakeLedger {
    pub fn new(corpus: &Corpus, bounds: LedgerBounds) -> Self {
        Self {
            bounds,
            vocabulary: corpus.words().iter().cloned().collect(),
            weights: HashMap::new(),
        }
    }

    pub fn bounds(&self) -> LedgerBounds {
        self.bounds
    }

    pub fn weight_of(&self, word: &str) -> u32 {
        self.weights.get(word).copied().unwrap_or(BASELINE_WEIGHT)
    }

    /// Raise `word` by `score`, kept within `[min_range, abs_limit]`.
    ///
    /// Returns `false` and leaves the ledger alone when `word` is not part of
    /// the vocabulary; the typing test sometimes reports words it never showed.
    pub fn record_mistake(&mut self, word: &str, score: u32) -> bool {
        if !self.vocabulary.contains(word) {
            return false;
        }
        let raised = self
            .weight_of(word)
            .saturating_add(score)
            .clamp(self.bounds.min_range, self.bounds.abs_limit);
        self.weights.insert(word.to_string(), raised);
        true
    }

    /// Lower a tracked `word` by `score`, floored at the minimum range.
    ///
    /// Untracked words keep their baseline weight and `false` is returned.
    pub fn record_correct(&mut self, word: &str, score: u32) -> bool {
        match self.weights.get_mut(word) {
            Some(weight) => {
                *weight = weight.saturating_sub(score).max(self.bounds.min_range);
                true
            }
            None => false,
        }
    }

    pub fn is_tracked(&self, word: &str) -> bool {
        self.weights.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.weights.iter().map(|(w, c)| (w.as_str(), *c))
    }
}
