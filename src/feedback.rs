use crate::config::{DrillConfig, LedgerBounds};
use crate::corpus::Corpus;
use crate::error::{DrillError, Result};
use crate::exercise::{practice_text, ExerciseAdapter, Mistake, RoundResult};
use crate::ledger::MistakeLedger;
use crate::sampler::WeightedSampler;
use itertools::Itertools;
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Drives rounds of the typing test until the user quits.
///
/// Each round samples words from the corpus weighted by the ledger, hands
/// them to the adapter, and feeds the reported mistakes back into the ledger.
pub struct FeedbackLoop<A: ExerciseAdapter, R: Rng = ThreadRng> {
    corpus: Corpus,
    ledger: MistakeLedger,
    sampler: WeightedSampler,
    adapter: A,
    rng: R,
    state: LoopState,
    round_no: usize,
    result_code: i32,
}

impl<A: ExerciseAdapter> FeedbackLoop<A, ThreadRng> {
    pub fn new(config: &DrillConfig, corpus: Corpus, adapter: A) -> Result<Self> {
        Self::with_rng(config, corpus, adapter, rand::thread_rng())
    }
}

impl<A: ExerciseAdapter, R: Rng> FeedbackLoop<A, R> {
    pub fn with_rng(config: &DrillConfig, corpus: Corpus, adapter: A, rng: R) -> Result<Self> {
        let bounds = config.ledger_bounds()?;
        if corpus.is_empty() {
            return Err(DrillError::Configuration(
                "word list is empty, nothing to practice".into(),
            ));
        }

        Ok(Self {
            ledger: MistakeLedger::new(&corpus, bounds),
            sampler: WeightedSampler::new(config.words_per_round),
            corpus,
            adapter,
            rng,
            state: LoopState::Running,
            round_no: 0,
            result_code: 0,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ledger(&self) -> &MistakeLedger {
        &self.ledger
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn rounds_played(&self) -> usize {
        self.round_no
    }

    /// Exit code to report once the loop has stopped
    pub fn result_code(&self) -> i32 {
        self.result_code
    }

    /// Run rounds until the typing test signals a quit, returning the exit code.
    pub fn run(&mut self) -> Result<i32> {
        while self.state == LoopState::Running {
            self.tick()?;
        }
        Ok(self.result_code)
    }

    /// Play one round. A stopped loop stays stopped.
    pub fn tick(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Stopped {
            return Ok(self.state);
        }

        self.round_no += 1;
        info!("Doing round #{}", self.round_no);

        let words = self.sampler.draw(&self.corpus, &self.ledger, &mut self.rng)?;
        let result = match self.adapter.run(&practice_text(&words)) {
            Ok(result) => result,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping round #{}: {}", self.round_no, e);
                return Ok(self.state);
            }
            Err(e) => return Err(e),
        };

        self.apply(&words, result);
        Ok(self.state)
    }

    fn apply(&mut self, words: &[String], result: RoundResult) {
        info!(
            "Typing test exit code for round #{}: {}",
            self.round_no, result.exit_code
        );

        if result.exit_code != 0 {
            // A non-zero exit without any stderr is how the test reports a clean quit
            self.result_code = if result.stderr_empty {
                0
            } else {
                result.exit_code
            };
            self.state = LoopState::Stopped;
            info!(
                "Round #{} -> {} with exit code {}",
                self.round_no, self.state, self.result_code
            );
            return;
        }

        if result.mistakes.is_empty() {
            warn!("Continuing round #{} because: no mistakes made", self.round_no);
            return;
        }

        self.update_ledger(words, &result.mistakes);
        debug!(
            "Ledger after round #{}: {:?}",
            self.round_no,
            self.ledger.iter().sorted().collect::<Vec<_>>()
        );
    }

    fn update_ledger(&mut self, words: &[String], mistakes: &[Mistake]) {
        let bounds = self.ledger.bounds();

        for mistake in mistakes {
            let score = draw_score(&mut self.rng, bounds);
            if !self.ledger.record_mistake(&mistake.word, score) {
                debug!(
                    "Discarding mistake for unknown word {:?} (typed {:?})",
                    mistake.word, mistake.typed
                );
            }
        }

        // Each reported mistake accounts for one sampled occurrence of its word
        let mut unmatched = mistakes.iter().map(|m| m.word.as_str()).counts();
        for word in words {
            match unmatched.get_mut(word.as_str()) {
                Some(n) if *n > 0 => *n -= 1,
                _ => {
                    let score = draw_score(&mut self.rng, bounds);
                    self.ledger.record_correct(word, score);
                }
            }
        }
    }
}

/// Adjustment magnitude, drawn fresh for every word update
fn draw_score<R: Rng + ?Sized>(rng: &mut R, bounds: LedgerBounds) -> u32 {
    rng.gen_range(bounds.min_range..=bounds.max_range)
}
