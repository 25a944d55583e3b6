//! Log setup for the `out` step.
//!
//! Every event is written to stderr; stdout is reserved for the response
//! document.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber. `RUST_LOG` overrides `level`; `json`
/// switches to one JSON object per line. Later calls are no-ops.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let events = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(events.json()).try_init()
    } else {
        registry.with(events.with_ansi(false)).try_init()
    };
    installed.ok();
}
