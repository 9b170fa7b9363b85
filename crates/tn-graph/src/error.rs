//! Graph-specific error types.

use thiserror::Error;
use tn_core::{ArcId, CityId, CohortId, TnError, TubeId, TypeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Instance construction, lookup and traversal errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("City {0} does not exist")]
    UnknownCity(CityId),

    #[error("Cohort {0} does not exist")]
    UnknownCohort(CohortId),

    #[error("Sample type {0} does not exist")]
    UnknownType(TypeId),

    #[error("Tube {0} does not exist")]
    UnknownTube(TubeId),

    /// The arc was never created or has been deleted.
    #[error("Arc {0} does not exist")]
    UnknownArc(ArcId),

    #[error("City number {number} is used by more than one city")]
    DuplicateCityNumber { number: u32 },

    #[error("City {city} already hosts a cohort")]
    CohortCityTaken { city: CityId },

    #[error("Cohort {cohort} declares type '{name}' twice")]
    DuplicateTypeName { cohort: CohortId, name: String },

    #[error("Tube {tube} of type {sample_type} is numbered {actual}, expected {expected}")]
    TubeNumbering {
        tube: TubeId,
        sample_type: TypeId,
        expected: u32,
        actual: u32,
    },

    #[error("City {city} has a demand for unknown type '{name}'")]
    UnknownTypeName { city: CityId, name: String },

    /// Arc lists disagree (an arc missing from, or duplicated in, a mirror list).
    #[error("Arc {arc} is inconsistent: {detail}")]
    InconsistentMirror { arc: ArcId, detail: &'static str },

    /// The arcs of one tube loop back to a city already on the current route.
    #[error("Arcs of tube {tube} form a cycle through city {city}")]
    Cycle { tube: TubeId, city: CityId },

    #[error(transparent)]
    Core(#[from] TnError),
}
