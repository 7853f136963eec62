//! Interval bisection over a snapshot chain
//!
//! This crate provides:
//! - The probe abstraction (opaque, equality-compared outputs)
//! - A memoizing probe cache (each index probed at most once)
//! - The bisection engine: finds every index whose probe output differs
//!   from its predecessor without probing the whole chain
//!
//! The engine works on indices only; mapping indices to revisions and
//! running the actual probe command are the callers' concern.

pub mod bisect;
pub mod cache;
pub mod probe;

// Re-exports
pub use bisect::{find_relevant, Outcome, Stats};
pub use cache::ProbeCache;
pub use probe::{Probe, ProbeOutput};

/// Result type for engine operations
pub type Result<T> = anyhow::Result<T>;
