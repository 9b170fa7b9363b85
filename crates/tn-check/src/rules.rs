//! The ordered rule sequence.

use tn_core::{TubeId, TypeId};
use tn_flow::required_volume;
use tn_graph::{GraphError, Instance, hop_count, path_exists};
use tracing::debug;

use crate::policy::DrawPolicy;
use crate::violation::{CheckResult, Violation};

/// Check every rule in order and return the first violation.
///
/// Nothing is modified; a feasible solution yields `Ok(())`.
pub fn check_solution(instance: &Instance, policy: DrawPolicy) -> CheckResult<()> {
    let result = unique_incoming_types(instance)
        .and_then(|()| self_loops(instance))
        .and_then(|()| arcs_to_cohort(instance))
        .and_then(|()| capacities(instance))
        .and_then(|()| drawn_tubes(instance, policy))
        .and_then(|()| freeze_counts(instance))
        .and_then(|()| demands_served(instance));

    match &result {
        Ok(()) => debug!(arcs = instance.arc_count(), "solution is feasible"),
        Err(violation) => debug!(rule = violation.rule(), %violation, "solution rejected"),
    }
    result
}

/// Rule 1.
fn unique_incoming_types(instance: &Instance) -> CheckResult<()> {
    for city in instance.cities() {
        if city.incoming.len() < 2 {
            continue;
        }
        let mut seen: Vec<TypeId> = Vec::with_capacity(city.incoming.len());
        for &id in &city.incoming {
            let ty = instance.tube(instance.arc(id)?.tube)?.sample_type;
            if seen.contains(&ty) {
                let sample_type = instance.sample_type(ty)?;
                let cohort = instance.cohort(sample_type.cohort)?;
                return Err(Violation::DuplicateIncomingType {
                    city: city.display_name(),
                    type_name: sample_type.name.clone(),
                    cohort: instance.city(cohort.city)?.display_name(),
                });
            }
            seen.push(ty);
        }
    }
    Ok(())
}

/// Rule 2.
fn self_loops(instance: &Instance) -> CheckResult<()> {
    for tube in instance.tubes_in_file_order() {
        for &id in &tube.arcs {
            let arc = instance.arc(id)?;
            if arc.is_self_loop() {
                let l = label(instance, tube.id)?;
                return Err(Violation::SelfLoop {
                    tube: l.tube,
                    type_name: l.type_name,
                    cohort: l.cohort,
                    city: instance.city(arc.destination)?.display_name(),
                });
            }
        }
    }
    Ok(())
}

/// Rule 3.
fn arcs_to_cohort(instance: &Instance) -> CheckResult<()> {
    for tube in instance.tubes_in_file_order() {
        let cohort_city = instance.tube_origin(tube.id)?;
        for &id in &tube.arcs {
            let arc = instance.arc(id)?;
            if arc.destination == cohort_city {
                let l = label(instance, tube.id)?;
                return Err(Violation::ArcToCohort {
                    tube: l.tube,
                    type_name: l.type_name,
                    cohort: l.cohort,
                    city: instance.city(arc.origin)?.display_name(),
                });
            }
        }
    }
    Ok(())
}

/// Rule 4.
fn capacities(instance: &Instance) -> CheckResult<()> {
    for tube in instance.tubes_in_file_order() {
        let cohort_city = instance.tube_origin(tube.id)?;
        let required = required_volume(instance, cohort_city, tube.id)
            .map_err(|err| looped(instance, err))?;
        if required > tube.volume {
            let l = label(instance, tube.id)?;
            return Err(Violation::OverCapacity {
                tube: l.tube,
                type_name: l.type_name,
                cohort: l.cohort,
                capacity: tube.volume,
                required,
            });
        }
    }
    Ok(())
}

/// Rule 5.
fn drawn_tubes(instance: &Instance, policy: DrawPolicy) -> CheckResult<()> {
    for cohort in instance.cohorts() {
        for &ty in &cohort.types {
            let sample_type = instance.sample_type(ty)?;
            let mut drawn = 0;
            for &tube in &sample_type.tubes {
                if instance.tube(tube)?.used_by_cohort {
                    drawn += 1;
                }
            }
            if policy.allows(drawn) {
                continue;
            }
            let cohort_name = instance.city(cohort.city)?.display_name();
            let type_name = sample_type.name.clone();
            return Err(if drawn == 0 {
                Violation::NoDrawnTube {
                    cohort: cohort_name,
                    type_name,
                }
            } else {
                Violation::SeveralDrawnTubes {
                    cohort: cohort_name,
                    type_name,
                }
            });
        }
    }
    Ok(())
}

/// Rule 6. Unreached cities have no path and count zero hops.
fn freeze_counts(instance: &Instance) -> CheckResult<()> {
    let max = instance.max_freezes();
    for tube in instance.tubes_in_file_order() {
        let cohort_city = instance.tube_origin(tube.id)?;
        for city in instance.cities() {
            let hops = hop_count(instance, cohort_city, city.id, tube.id)
                .map_err(|err| looped(instance, err))?;
            if hops > max as usize {
                let l = label(instance, tube.id)?;
                return Err(Violation::TooManyFreezes {
                    tube: l.tube,
                    type_name: l.type_name,
                    cohort: l.cohort,
                    city: city.display_name(),
                    hops,
                    max,
                });
            }
        }
    }
    Ok(())
}

/// Rule 7.
fn demands_served(instance: &Instance) -> CheckResult<()> {
    for cohort in instance.cohorts() {
        for &ty in &cohort.types {
            let sample_type = instance.sample_type(ty)?;
            for city in instance.cities() {
                if city.demand(&sample_type.name).is_zero() {
                    continue;
                }
                let mut served = false;
                for &tube in &sample_type.tubes {
                    if path_exists(instance, cohort.city, city.id, tube)
                        .map_err(|err| looped(instance, err))?
                    {
                        served = true;
                        break;
                    }
                }
                if !served {
                    return Err(Violation::NotServed {
                        city: city.display_name(),
                        type_name: sample_type.name.clone(),
                        cohort: instance.city(cohort.city)?.display_name(),
                    });
                }
            }
        }
    }
    Ok(())
}

struct Label {
    tube: u32,
    type_name: String,
    cohort: String,
}

fn label(instance: &Instance, tube: TubeId) -> CheckResult<Label> {
    let sample_type = instance.tube_type(tube)?;
    let cohort = instance.cohort(sample_type.cohort)?;
    Ok(Label {
        tube: instance.tube(tube)?.number,
        type_name: sample_type.name.clone(),
        cohort: instance.city(cohort.city)?.display_name(),
    })
}

/// Turn a cycle found while walking a tube into a readable violation.
fn looped(instance: &Instance, err: GraphError) -> Violation {
    let (tube, city) = match err {
        GraphError::Cycle { tube, city } => (tube, city),
        other => return Violation::Graph(other),
    };
    let city = match instance.city(city) {
        Ok(c) => c.display_name(),
        Err(e) => return Violation::Graph(e),
    };
    match label(instance, tube) {
        Ok(l) => Violation::Loop {
            tube: l.tube,
            type_name: l.type_name,
            cohort: l.cohort,
            city,
        },
        Err(v) => v,
    }
}
