//! Shared application service layer for tubenet.
//!
//! This crate ties the parser, the arc graph service, the flow calculator and
//! the validator into one editing [`Session`], configured from a YAML file.

pub mod config;
pub mod error;
pub mod session;
pub mod summary;

// Re-export key types for convenience
pub use config::{SessionConfig, load_config};
pub use error::{AppError, AppResult};
pub use session::{Selection, Session};
pub use summary::{BusiestCity, SolutionSummary, TubeSummary, summarize};
