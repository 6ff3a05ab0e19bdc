//! Wall-clock driver for the simulation.
//!
//! `sim-core` knows nothing about real time; this crate supplies the
//! missing half: a [`FrameClock`] that converts elapsed render-frame time
//! into whole 60 Hz ticks, and a [`Session`] facade that owns a level and
//! exposes the handful of calls a host (renderer, headless server, tests)
//! needs to drive it.

pub mod clock;
pub mod session;

pub use clock::FrameClock;
pub use session::Session;

/// Installs the default tracing subscriber, filtered through `RUST_LOG`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
