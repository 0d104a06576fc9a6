//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,glidechart=debug,glidechart_egui=debug";

/// Install a formatting subscriber honouring `RUST_LOG`.
///
/// Falls back to [`DEFAULT_FILTER`]. Calling this twice is harmless; the
/// second installation attempt is ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    init_with_filter(filter);
}

/// Install a formatting subscriber with an explicit filter.
pub fn init_with_filter(filter: EnvFilter) {
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
