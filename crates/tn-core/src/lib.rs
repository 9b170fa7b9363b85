//! tn-core: stable foundation for tubenet.
//!
//! Contains:
//! - ids (stable compact IDs for the arena-backed domain model)
//! - volume (exact fixed-point sample volumes)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod volume;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TnError, TnResult};
pub use ids::*;
pub use volume::Volume;
