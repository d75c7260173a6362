//! Logging setup for the proxy binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logging flags for the proxy.
#[derive(Debug, clap::Args)]
pub struct LogArgs {
    /// Log filter directives, e.g. "debug" or "info,kvproxy=debug,h2=warn".
    #[arg(long = "log.level", default_value = "info", env = "KVPROXY_LOG", global = true)]
    pub level: String,

    /// Emit logs as JSON lines instead of text.
    #[arg(long = "log.json", global = true)]
    pub json: bool,
}

/// Install the process-wide subscriber. Logs go to stderr, so they never mix
/// with anything the process writes to stdout. Panics if called twice.
pub fn install(args: &LogArgs) {
    // Unparseable directives fall back to plain "info" rather than aborting
    // startup over a logging flag.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(&args.level);

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if args.json {
        builder.json().flatten_event(true).init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}
