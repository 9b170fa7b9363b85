use thiserror::Error;
use tn_core::Volume;
use tn_graph::GraphError;

pub type CheckResult<T> = Result<T, Violation>;

/// The first rule a solution breaks.
///
/// Cities and cohorts are named in their decorated `name [number]` form so the
/// message alone is enough to find the problem on a map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{city} receives several tubes of type {type_name} from cohort {cohort}")]
    DuplicateIncomingType {
        city: String,
        type_name: String,
        cohort: String,
    },

    #[error("Tube {tube} of type {type_name} from cohort {cohort} has an arc from {city} to itself")]
    SelfLoop {
        tube: u32,
        type_name: String,
        cohort: String,
        city: String,
    },

    #[error(
        "Tube {tube} of type {type_name} from cohort {cohort} has an arc from {city} back to its cohort city"
    )]
    ArcToCohort {
        tube: u32,
        type_name: String,
        cohort: String,
        city: String,
    },

    #[error(
        "Tube {tube} of type {type_name} from cohort {cohort} cannot carry the requested volume (capacity: {capacity}, required: {required})"
    )]
    OverCapacity {
        tube: u32,
        type_name: String,
        cohort: String,
        capacity: Volume,
        required: Volume,
    },

    #[error("Cohort {cohort} draws from several tubes of type {type_name}; choose one")]
    SeveralDrawnTubes { cohort: String, type_name: String },

    #[error("Cohort {cohort} draws from no tube of type {type_name}; choose one")]
    NoDrawnTube { cohort: String, type_name: String },

    #[error(
        "Tube {tube} of type {type_name} from cohort {cohort} reaches {city} after {hops} freezes (max {max})"
    )]
    TooManyFreezes {
        tube: u32,
        type_name: String,
        cohort: String,
        city: String,
        hops: usize,
        max: u32,
    },

    #[error("{city} is not served with type {type_name} by cohort {cohort}")]
    NotServed {
        city: String,
        type_name: String,
        cohort: String,
    },

    #[error("Tube {tube} of type {type_name} from cohort {cohort} loops back through {city}")]
    Loop {
        tube: u32,
        type_name: String,
        cohort: String,
        city: String,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl Violation {
    /// Rule number (1-7) that failed, or 0 for a malformed graph.
    pub fn rule(&self) -> u8 {
        match self {
            Violation::DuplicateIncomingType { .. } => 1,
            Violation::SelfLoop { .. } => 2,
            Violation::ArcToCohort { .. } => 3,
            Violation::OverCapacity { .. } | Violation::Loop { .. } => 4,
            Violation::SeveralDrawnTubes { .. } | Violation::NoDrawnTube { .. } => 5,
            Violation::TooManyFreezes { .. } => 6,
            Violation::NotServed { .. } => 7,
            Violation::Graph(_) => 0,
        }
    }
}
