//! tn-graph: network model and arc graph service for tubenet.
//!
//! Provides:
//! - Domain entities (City, Cohort, SampleType, Tube, Arc) in an arena-backed [`Instance`]
//! - Incremental instance builder with structural validation
//! - Arc primitives that keep endpoint and tube lists mirrored
//! - Per-tube path queries with cycle detection
//! - [`ArcGraph`], the editing service that notifies subscribers
//!
//! # Example
//!
//! ```
//! use tn_core::Volume;
//! use tn_graph::{ArcGraph, InstanceBuilder};
//!
//! let mut builder = InstanceBuilder::new();
//! let lyon = builder.add_city(0, "Lyon", None);
//! let paris = builder.add_city(1, "Paris", None);
//! let cohort = builder.add_cohort(lyon, 12).unwrap();
//! let serum = builder.add_type(cohort, "SER").unwrap();
//! let tube = builder.add_tube(serum, Volume::units(10)).unwrap();
//!
//! let mut graph = ArcGraph::new(builder.build().unwrap());
//! let arc = graph.create_arc(lyon, paris, tube).unwrap();
//! graph.add_arc(arc).unwrap();
//!
//! assert!(graph.path_exists(lyon, paris, tube).unwrap());
//! assert_eq!(graph.find_path(lyon, paris, tube).unwrap(), vec![arc]);
//! ```

pub mod arcs;
pub mod builder;
pub mod error;
pub mod model;
pub mod paths;
pub mod service;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::InstanceBuilder;
pub use error::{GraphError, GraphResult};
pub use model::{Arc, City, Cohort, GeoPoint, Instance, SampleType, Solution, Tube};
pub use paths::{find_path, hop_count, path_exists};
pub use service::{ArcChange, ArcGraph, Subscriber};
