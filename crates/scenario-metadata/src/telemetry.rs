//! Tracing initialisation for the generator binary.
//!
//! Log lines go to stderr so stdout only carries the final summary line.
//! Filtering is fixed to the supplied level; `RUST_LOG` is not consulted.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber at `level`.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing(level: Level) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(level.as_str()))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
