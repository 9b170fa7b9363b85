//! Structural validation logic.
//!
//! These checks cover how an instance is put together. Whether a solution is
//! feasible is a separate question answered by `tn-check`.

use std::collections::HashSet;
use tn_core::ArcId;

use crate::error::{GraphError, GraphResult};
use crate::model::{Arc, City, Cohort, Instance, SampleType, Tube};

/// Validate the instance structure: references exist, numbering is consistent, etc.
pub(crate) fn validate_structure(
    cities: &[City],
    cohorts: &[Cohort],
    types: &[SampleType],
    tubes: &[Tube],
    type_names: &[String],
) -> GraphResult<()> {
    // City numbers identify cities in the text files
    let mut numbers = HashSet::new();
    for city in cities {
        if !numbers.insert(city.number) {
            return Err(GraphError::DuplicateCityNumber {
                number: city.number,
            });
        }
    }

    // Each cohort sits on an existing city that points back at it
    for cohort in cohorts {
        let city = cities
            .get(cohort.city.index())
            .ok_or(GraphError::UnknownCity(cohort.city))?;
        if city.cohort != Some(cohort.id) {
            return Err(GraphError::CohortCityTaken { city: city.id });
        }

        let mut names = HashSet::new();
        for &ty in &cohort.types {
            let sample_type = types.get(ty.index()).ok_or(GraphError::UnknownType(ty))?;
            if !names.insert(sample_type.name.as_str()) {
                return Err(GraphError::DuplicateTypeName {
                    cohort: cohort.id,
                    name: sample_type.name.clone(),
                });
            }
        }
    }

    // Tubes are numbered 1..n within their type
    for sample_type in types {
        for (i, &tube_id) in sample_type.tubes.iter().enumerate() {
            let tube = tubes
                .get(tube_id.index())
                .ok_or(GraphError::UnknownTube(tube_id))?;
            let expected = i as u32 + 1;
            if tube.number != expected || tube.sample_type != sample_type.id {
                return Err(GraphError::TubeNumbering {
                    tube: tube_id,
                    sample_type: sample_type.id,
                    expected,
                    actual: tube.number,
                });
            }
        }
    }

    // Demands only name known types
    if !type_names.is_empty() {
        for city in cities {
            if let Some(name) = city.demands.keys().find(|n| !type_names.contains(n)) {
                return Err(GraphError::UnknownTypeName {
                    city: city.id,
                    name: name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validate that every live arc is mirrored exactly once in its origin's
/// outgoing list, its destination's incoming list and its tube's arc list,
/// and that those lists hold nothing else.
pub(crate) fn validate_mirror(instance: &Instance) -> GraphResult<()> {
    for arc in instance.arcs() {
        let origin = instance.city(arc.origin)?;
        let destination = instance.city(arc.destination)?;
        let tube = instance.tube(arc.tube)?;

        if count(&origin.outgoing, arc.id) != 1 {
            return Err(mirror(arc, "not listed once in origin's outgoing arcs"));
        }
        if count(&destination.incoming, arc.id) != 1 {
            return Err(mirror(arc, "not listed once in destination's incoming arcs"));
        }
        if count(&tube.arcs, arc.id) != 1 {
            return Err(mirror(arc, "not listed once in its tube's arcs"));
        }
    }

    // Lists must not reference dead arcs or arcs pointing elsewhere
    for city in instance.cities() {
        for &id in &city.outgoing {
            let arc = instance.arc(id)?;
            if arc.origin != city.id {
                return Err(mirror(arc, "listed as outgoing by a city that is not its origin"));
            }
        }
        for &id in &city.incoming {
            let arc = instance.arc(id)?;
            if arc.destination != city.id {
                return Err(mirror(
                    arc,
                    "listed as incoming by a city that is not its destination",
                ));
            }
        }
    }
    for tube in instance.tubes() {
        for &id in &tube.arcs {
            let arc = instance.arc(id)?;
            if arc.tube != tube.id {
                return Err(mirror(arc, "listed by a tube that does not own it"));
            }
        }
    }

    Ok(())
}

fn count(list: &[ArcId], id: ArcId) -> usize {
    list.iter().filter(|&&a| a == id).count()
}

fn mirror(arc: &Arc, detail: &'static str) -> GraphError {
    GraphError::InconsistentMirror { arc: arc.id, detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::InstanceBuilder;
    use tn_core::Volume;

    #[test]
    fn validate_empty_instance() {
        assert!(validate_structure(&[], &[], &[], &[], &[]).is_ok());
    }

    #[test]
    fn validate_duplicate_city_number() {
        let mut builder = InstanceBuilder::new();
        builder.add_city(3, "A", None);
        builder.add_city(3, "B", None);
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::DuplicateCityNumber { number: 3 }
        );
    }

    #[test]
    fn validate_duplicate_type_in_cohort() {
        let mut builder = InstanceBuilder::new();
        let a = builder.add_city(0, "A", None);
        let cohort = builder.add_cohort(a, 1).unwrap();
        builder.add_type(cohort, "SER").unwrap();
        builder.add_type(cohort, "SER").unwrap();
        assert!(matches!(
            builder.build(),
            Err(GraphError::DuplicateTypeName { .. })
        ));
    }

    #[test]
    fn validate_demand_for_unknown_type() {
        let mut builder = InstanceBuilder::new();
        builder.set_type_names(["SER"]);
        let a = builder.add_city(0, "A", None);
        builder.set_demand(a, "LCR", Volume::units(1)).unwrap();
        assert!(matches!(
            builder.build(),
            Err(GraphError::UnknownTypeName { .. })
        ));
    }

    #[test]
    fn validate_mirror_after_edits() {
        let mut builder = InstanceBuilder::new();
        let a = builder.add_city(0, "A", None);
        let b = builder.add_city(1, "B", None);
        let c = builder.add_city(2, "C", None);
        let cohort = builder.add_cohort(a, 1).unwrap();
        let ty = builder.add_type(cohort, "SER").unwrap();
        let tube = builder.add_tube(ty, Volume::units(1)).unwrap();
        let mut instance = builder.build().unwrap();

        let arc = instance.create_arc(a, b, tube).unwrap();
        assert!(validate_mirror(&instance).is_ok());
        instance.reroute_destination(arc, c).unwrap();
        assert!(validate_mirror(&instance).is_ok());
        instance.remove_arc(arc).unwrap();
        assert!(validate_mirror(&instance).is_ok());
    }
}
