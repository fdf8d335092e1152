use crate::corpus::Corpus;
use crate::error::{DrillError, Result};
use crate::ledger::MistakeLedger;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Draws a round of words, favouring the ones the ledger says are hard
#[derive(Debug, Clone, Copy)]
pub struct WeightedSampler {
    words_per_round: usize,
}

impl WeightedSampler {
    pub fn new(words_per_round: usize) -> Self {
        Self { words_per_round }
    }

    /// Current sampling weight of every corpus slot, in corpus order
    pub fn weights(corpus: &Corpus, ledger: &MistakeLedger) -> Vec<u64> {
        corpus
            .words()
            .iter()
            .map(|w| u64::from(ledger.weight_of(w)))
            .collect()
    }

    /// Draw `words_per_round` words with replacement. Each slot is picked with
    /// probability proportional to its ledger weight.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        corpus: &Corpus,
        ledger: &MistakeLedger,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        if corpus.is_empty() {
            return Err(DrillError::Configuration(
                "word list is empty, nothing to practice".into(),
            ));
        }

        let weights = Self::weights(corpus, ledger);
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| DrillError::Configuration(format!("unusable word weights: {e}")))?;

        let words = corpus.words();
        Ok((0..self.words_per_round)
            .map(|_| words[dist.sample(rng)].clone())
            .collect())
    }
}
