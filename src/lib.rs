// Library surface for the binary and integration tests.
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod ledger;
pub mod logging;
pub mod sampler;

pub use config::{DrillConfig, LedgerBounds, WordSource};
pub use corpus::Corpus;
pub use error::{DrillError, Result};
pub use exercise::{ExerciseAdapter, Mistake, RoundResult, TypingTest};
pub use feedback::{FeedbackLoop, LoopState};
pub use ledger::MistakeLedger;
pub use sampler::WeightedSampler;
