use tracing_subscriber::EnvFilter;

/// Env var holding an `EnvFilter` directive, e.g. `SANTA_LOG=santa_core=debug`.
pub const LOG_ENV: &str = "SANTA_LOG";

/// Install the stderr subscriber. `--verbose` wins over `SANTA_LOG`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
