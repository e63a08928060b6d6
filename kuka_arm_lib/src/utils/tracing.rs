//! Centralized tracing initialization for the simulation binaries.
//!
//! Installs a thread-local subscriber so that library tests and embedding
//! applications can keep their own global subscriber.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize tracing with thread-local subscriber.
///
/// Respects the `RUST_LOG` environment variable and defaults to `info`.
///
/// # Returns
/// A `DefaultGuard` that keeps the subscriber active. The guard must be kept
/// in scope for the duration of the program.
///
/// # Example
/// ```no_run
/// use kuka_arm_lib::init_tracing;
///
/// fn main() {
///     let _guard = init_tracing();
///     // Record trajectories here
/// }
/// ```
pub fn init_tracing() -> DefaultGuard {
    init_tracing_with(DEFAULT_LOG_FILTER)
}

/// Same as [`init_tracing`] but with a caller-chosen fallback filter, e.g.
/// `"kuka_arm_lib=debug"` to see every recorded move.
pub fn init_tracing_with(fallback: &str) -> DefaultGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Compact lines: the recorder logs one event per move, targets add noise.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    tracing::subscriber::set_default(
        tracing_subscriber::Registry::default()
            .with(env_filter)
            .with(fmt_layer),
    )
}

