use crate::error::{DrillError, Result};
use std::path::PathBuf;

pub const DEFAULT_TYPER_EXE: &str = "tt";
pub const DEFAULT_TYPER_MAX_SECS: u32 = 30;
pub const DEFAULT_TYPER_MAX_WORDS: usize = 30;
pub const DEFAULT_TYPER_ARGS_EXTRAS: &str = "-noskip;-theme=default";
pub const DEFAULT_WORD_LIST: &str = "two-hundred";
pub const DEFAULT_COUNTER_MIN_RANGE: u32 = 2;
pub const DEFAULT_COUNTER_MAX_RANGE: u32 = 100;
pub const DEFAULT_COUNTER_ABS_LIMIT_MULTIPLIER: u32 = 3;

/// Where the practice vocabulary comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// A word list compiled into the binary, addressed by name
    Bundled(String),
    /// A whitespace separated word file on disk
    File(PathBuf),
}

impl Default for WordSource {
    fn default() -> Self {
        WordSource::Bundled(DEFAULT_WORD_LIST.to_string())
    }
}

/// Immutable settings for one drilling run
#[derive(Debug, Clone, PartialEq)]
pub struct DrillConfig {
    pub typer_exe: String,
    pub typer_max_secs: u32,
    pub typer_args_extras: Vec<String>,
    pub word_source: WordSource,
    pub counter_min_range: u32,
    pub counter_max_range: u32,
    pub counter_abs_limit_multiplier: u32,
    pub words_per_round: usize,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            typer_exe: DEFAULT_TYPER_EXE.to_string(),
            typer_max_secs: DEFAULT_TYPER_MAX_SECS,
            typer_args_extras: split_extras(DEFAULT_TYPER_ARGS_EXTRAS),
            word_source: WordSource::default(),
            counter_min_range: DEFAULT_COUNTER_MIN_RANGE,
            counter_max_range: DEFAULT_COUNTER_MAX_RANGE,
            counter_abs_limit_multiplier: DEFAULT_COUNTER_ABS_LIMIT_MULTIPLIER,
            words_per_round: DEFAULT_TYPER_MAX_WORDS,
        }
    }
}

impl DrillConfig {
    /// Reject numeric settings the ledger and sampler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.counter_min_range == 0 {
            return Err(DrillError::Configuration(
                "counter minimum range must be at least 1".into(),
            ));
        }
        if self.counter_min_range > self.counter_max_range {
            return Err(DrillError::Configuration(format!(
                "counter minimum range {} exceeds maximum range {}",
                self.counter_min_range, self.counter_max_range
            )));
        }
        if self.counter_abs_limit_multiplier == 0 {
            return Err(DrillError::Configuration(
                "absolute limit multiplier must be at least 1".into(),
            ));
        }
        if self.abs_limit().is_none() {
            return Err(DrillError::Configuration(format!(
                "absolute limit {} * {} does not fit a counter",
                self.counter_max_range, self.counter_abs_limit_multiplier
            )));
        }
        if self.words_per_round == 0 {
            return Err(DrillError::Configuration(
                "at least one word per round is required".into(),
            ));
        }
        if self.typer_max_secs == 0 {
            return Err(DrillError::Configuration(
                "typing test time limit must be at least one second".into(),
            ));
        }
        Ok(())
    }

    pub fn abs_limit(&self) -> Option<u32> {
        self.counter_max_range
            .checked_mul(self.counter_abs_limit_multiplier)
    }

    /// Clamping bounds for the mistake ledger. Call after `validate`.
    pub fn ledger_bounds(&self) -> Result<LedgerBounds> {
        self.validate()?;
        Ok(LedgerBounds {
            min_range: self.counter_min_range,
            max_range: self.counter_max_range,
            abs_limit: self.abs_limit().unwrap_or(u32::MAX),
        })
    }
}

/// Numeric policy shared by the ledger (clamping) and the loop (score draws)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerBounds {
    pub min_range: u32,
    pub max_range: u32,
    pub abs_limit: u32,
}

impl Default for LedgerBounds {
    fn default() -> Self {
        Self {
            min_range: DEFAULT_COUNTER_MIN_RANGE,
            max_range: DEFAULT_COUNTER_MAX_RANGE,
            abs_limit: DEFAULT_COUNTER_MAX_RANGE * DEFAULT_COUNTER_ABS_LIMIT_MULTIPLIER,
        }
    }
}

/// Split a `;` separated flag list, dropping empty items.
pub fn split_extras(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}
