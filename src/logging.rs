use tracing_subscriber::EnvFilter;

/// Filter directive for a `--verbosity` value.
///
/// Verbosity picks the lowest severity that still gets printed: 1 shows
/// everything from debug up, 5 only errors, 0 nothing at all.
pub fn level_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "off",
        1 => "debug",
        2 => "info",
        3 => "warn",
        _ => "error",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbosity`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbosity)));

    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
