//! Profiling utilities based on the `puffin` crate.
//!
//! The scope macros are always available and cost a single atomic load while
//! scopes are disabled. The HTTP server needs the `profiling` feature.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling")]
mod server {
    use std::sync::OnceLock;

    static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

    /// Enable puffin scopes and serve them on `addr` (for example `0.0.0.0:8585`).
    ///
    /// # Example
    /// ```no_run
    /// folio_core::profiling::init_profiling("0.0.0.0:8585");
    /// ```
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
}

#[cfg(feature = "profiling")]
pub use server::init_profiling;

/// Mark the start of a new frame for profiling.
///
/// The host calls this once per tick, right before the coordinator's tick.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
