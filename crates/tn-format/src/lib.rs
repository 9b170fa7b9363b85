//! tn-format: text import and export of instances and solutions.
//!
//! Four inputs feed an [`Instance`](tn_graph::Instance):
//! - an optional GeoJSON map naming and locating the cities ([`map`])
//! - an optional list of type names ([`types`])
//! - the tab-separated instance file ([`instance`])
//! - the tab-separated solution file, which also is the export format ([`solution`])

pub mod instance;
pub mod map;
pub mod solution;
pub mod text;
pub mod types;

use std::path::Path;

use tn_graph::Instance;
use tracing::info;

pub use instance::parse_instance;
pub use map::{CityRecord, parse_map};
pub use solution::{parse_solution, write_solution};
pub use types::parse_type_names;

pub type FormatResult<T> = Result<T, FormatError>;

#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("Line {line}: {reason}")]
    Line { line: usize, reason: String },

    #[error("Unexpected end of file: expected {what}")]
    Truncated { what: &'static str },

    #[error("Line {line}: unknown city number {number}")]
    UnknownCity { line: usize, number: u32 },

    #[error("The map lists {available} cities but the instance needs {needed}")]
    NotEnoughCities { needed: usize, available: usize },

    #[error("The type list names {available} types but the instance needs {needed}")]
    NotEnoughTypes { needed: usize, available: usize },

    #[error("Map error: {0}")]
    Map(String),

    #[error("Graph error: {0}")]
    Graph(#[from] tn_graph::GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Read the instance file plus its optional map and type list.
pub fn load_instance(
    instance: &Path,
    map: Option<&Path>,
    types: Option<&Path>,
) -> FormatResult<Instance> {
    let cities = match map {
        Some(path) => Some(parse_map(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let type_names = match types {
        Some(path) => Some(parse_type_names(&std::fs::read_to_string(path)?)),
        None => None,
    };

    let content = std::fs::read_to_string(instance)?;
    let parsed = parse_instance(&content, cities.as_deref(), type_names.as_deref())?;
    info!(
        path = %instance.display(),
        cities = parsed.cities().len(),
        cohorts = parsed.cohorts().len(),
        tubes = parsed.tubes().len(),
        "instance loaded"
    );
    Ok(parsed)
}

/// Read a solution file into an instance that has no arcs yet.
pub fn load_solution(path: &Path, instance: &mut Instance) -> FormatResult<()> {
    let content = std::fs::read_to_string(path)?;
    parse_solution(&content, instance)?;
    info!(path = %path.display(), arcs = instance.arc_count(), "solution loaded");
    Ok(())
}

pub fn save_solution(path: &Path, instance: &Instance) -> FormatResult<()> {
    let content = write_solution(instance)?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), arcs = instance.arc_count(), "solution saved");
    Ok(())
}
