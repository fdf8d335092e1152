use clap::Parser;
use glowl::{
    app_dirs::AppDirs,
    config::{self, split_extras, DrillConfig, WordSource},
    logging, Corpus, FeedbackLoop, TypingTest,
};
use std::{error::Error, path::PathBuf, process};
use tracing::info;

/// adaptive typing drills that keep serving the words you keep missing
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glowl",
    version,
    about,
    long_about = "Runs the tt typing test over and over, weighting each round's words toward the ones you recently mistyped. Quit the typing test to stop."
)]
pub struct Cli {
    /// typing test executable
    #[clap(long, default_value = config::DEFAULT_TYPER_EXE)]
    typer_exe: String,

    /// time limit of one typing test round, in seconds
    #[clap(long = "typer-max-sec", default_value_t = config::DEFAULT_TYPER_MAX_SECS)]
    typer_max_secs: u32,

    /// extra arguments for the typing test, separated by ';'
    #[clap(long, default_value = config::DEFAULT_TYPER_ARGS_EXTRAS, allow_hyphen_values = true)]
    typer_exe_args_extras: String,

    /// whitespace separated word file (default: the bundled two-hundred list)
    #[clap(long)]
    typer_word_file: Option<PathBuf>,

    /// look for the word file in glowl's words directory
    #[clap(long)]
    prepend_words_dir: bool,

    /// smallest adjustment applied to a word's counter
    #[clap(long, default_value_t = config::DEFAULT_COUNTER_MIN_RANGE)]
    counter_min_range: u32,

    /// largest adjustment applied to a word's counter
    #[clap(long, default_value_t = config::DEFAULT_COUNTER_MAX_RANGE)]
    counter_max_range: u32,

    /// counters never exceed max range times this multiplier
    #[clap(long, default_value_t = config::DEFAULT_COUNTER_ABS_LIMIT_MULTIPLIER)]
    counter_abs_limit_multiplier: u32,

    /// number of words per round
    #[clap(long, default_value_t = config::DEFAULT_TYPER_MAX_WORDS)]
    typer_max_words: usize,

    /// log threshold: 0 disables logs, 1 is debug through 5 for errors only
    #[clap(short = 'v', long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
    verbosity: u8,
}

impl Cli {
    /// Convert CLI arguments to the drill configuration
    fn to_drill_config(&self) -> DrillConfig {
        let word_source = match &self.typer_word_file {
            Some(path) if self.prepend_words_dir => WordSource::File(AppDirs::word_file(path)),
            Some(path) => WordSource::File(path.clone()),
            None => WordSource::default(),
        };

        DrillConfig {
            typer_exe: self.typer_exe.clone(),
            typer_max_secs: self.typer_max_secs,
            typer_args_extras: split_extras(&self.typer_exe_args_extras),
            word_source,
            counter_min_range: self.counter_min_range,
            counter_max_range: self.counter_max_range,
            counter_abs_limit_multiplier: self.counter_abs_limit_multiplier,
            words_per_round: self.typer_max_words,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbosity);

    let config = cli.to_drill_config();
    config.validate()?;

    let corpus = Corpus::from_source(&config.word_source)?;
    let typer = TypingTest::from_config(&config);
    info!("Typer: {}", typer.exe());
    info!("Typer args: {:?}", typer.args());
    info!("Loaded {} words from {:?}", corpus.len(), config.word_source);

    let mut drill = FeedbackLoop::new(&config, corpus, typer)?;
    let code = drill.run()?;
    info!("Finished after {} rounds", drill.rounds_played());

    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
