//! tn-flow: derived quantities over the arc graph.
//!
//! - [`required_volume`]: what a city and everything downstream of it needs from a tube
//! - [`update_arc_quantities`]: flow carried by each arc of the working set
//! - [`compute_aliquots`]: how often tubes are split at each city
//! - [`refresh`] / [`subscriber`]: recompute everything and store it in the entity caches

pub mod aliquots;
pub mod recompute;
pub mod volume;

pub use aliquots::{AliquotReport, compute_aliquots, total_freezes};
pub use recompute::{refresh, subscriber};
pub use volume::{required_volume, update_arc_quantities};
