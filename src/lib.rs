// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod batch;
pub mod config;
pub mod provider;
pub mod reconcile;
pub mod romaji;
pub mod runtime;
pub mod session;
pub mod token;
pub mod util;

/// The session clock counts whole seconds, so the production tick matches it.
pub const TICK_RATE_MS: u64 = 1000;
