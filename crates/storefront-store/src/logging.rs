//! Tracing setup for hosts embedding the cart.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=storefront_store=trace` - Trace the store crate only
/// - Default: INFO, with DEBUG for every `storefront*` target
///
/// ## Returns
/// `false` if a global subscriber was already installed (by an earlier call
/// or by the host), in which case nothing changes.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
