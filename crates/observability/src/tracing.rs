//! Subscriber setup for the workspace's JSON log output.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: JSON lines, wall-clock timestamps,
/// filter taken from `RUST_LOG` (falling back to `info`).
///
/// Repeated calls are harmless; later ones lose the `try_init` race and
/// return without touching the installed subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
