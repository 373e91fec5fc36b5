use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const QUIET: &str = "warn";
const VERBOSE: &str = "xkcd_alt=debug,reqwest=trace";

/// Install the stderr subscriber. `RUST_LOG` wins over the verbose flag.
///
/// Only the first call in a process has any effect.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE } else { QUIET }));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init();
}
