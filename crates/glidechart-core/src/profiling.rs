//! Profiling utilities based on the `puffin` crate.
//!
//! Scopes are compiled in unconditionally and cost almost nothing while
//! `puffin::set_scopes_on(false)` (the default). Enable the
//! `profiling-server` feature to stream frames to `puffin_viewer`.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling-server")]
use std::sync::OnceLock;

#[cfg(feature = "profiling-server")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Default address of the puffin HTTP server.
#[cfg(feature = "profiling-server")]
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8585";

/// Turn scope collection on and start the puffin HTTP server.
///
/// # Example
/// ```no_run
/// glidechart_core::profiling::init_profiling(glidechart_core::profiling::DEFAULT_SERVER_ADDR);
/// ```
#[cfg(feature = "profiling-server")]
pub fn init_profiling(addr: &str) {
    puffin::set_scopes_on(true);

    match puffin_http::Server::new(addr) {
        Ok(server) => {
            tracing::info!("Puffin profiler server started on http://{}", addr);
            let _ = PROFILING_SERVER.set(server);
        }
        Err(e) => {
            tracing::error!("Failed to start puffin server: {}", e);
        }
    }
}

/// Enable or disable scope collection without starting a server.
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
}

/// Mark the start of a new profiler frame.
///
/// Hosts call this once per displayed frame when profiling is enabled.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_new_frame_publishes_recorded_scopes() {
        let frames = Arc::new(AtomicUsize::new(0));
        let counter = frames.clone();
        let sink = GlobalProfiler::lock().add_sink(Box::new(move |_frame| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        set_enabled(true);
        {
            profile_scope!("blend");
        }
        new_frame();
        set_enabled(false);

        GlobalProfiler::lock().remove_sink(sink);
        assert!(frames.load(Ordering::SeqCst) >= 1);
    }
}
