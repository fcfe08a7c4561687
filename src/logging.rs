use std::sync::OnceLock;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the stderr log subscriber.
///
/// `RUST_LOG` is honoured, defaulting to warnings only; `verbose` raises this
/// crate to `debug` on top of it. Only the first call has effect.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let base =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let filter = with_verbosity(base, verbose);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .init();
    });
}

fn with_verbosity(filter: EnvFilter, verbose: bool) -> EnvFilter {
    if !verbose {
        return filter;
    }
    match "evenodd=debug".parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
