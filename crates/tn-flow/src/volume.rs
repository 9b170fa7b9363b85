//! Recursive demand aggregation along one tube.

use tn_core::{ArcId, CityId, TubeId, Volume};
use tn_graph::{GraphError, GraphResult, Instance};

/// Volume `city` and every city fed from it along `tube` need from that tube.
///
/// The city's own demand for the tube's type counts, except at the cohort city
/// when the cohort does not draw from the tube. Each outgoing arc of the tube
/// adds the requirement of its destination.
pub fn required_volume(instance: &Instance, city: CityId, tube: TubeId) -> GraphResult<Volume> {
    let type_name = instance.tube_type(tube)?.name.as_str();
    let cohort_city = instance.tube_origin(tube)?;
    let used_by_cohort = instance.tube(tube)?.used_by_cohort;
    let mut route = Vec::new();
    accumulate(
        instance,
        &Ctx {
            tube,
            type_name,
            cohort_city,
            used_by_cohort,
        },
        city,
        &mut route,
    )
}

/// Set every arc's quantity to what its destination requires.
pub fn update_arc_quantities(instance: &mut Instance, arcs: &[ArcId]) -> GraphResult<()> {
    let mut computed = Vec::with_capacity(arcs.len());
    for &id in arcs {
        let arc = instance.arc(id)?;
        computed.push((id, required_volume(instance, arc.destination, arc.tube)?));
    }
    for (id, quantity) in computed {
        instance.set_arc_quantity(id, quantity)?;
    }
    Ok(())
}

struct Ctx<'a> {
    tube: TubeId,
    type_name: &'a str,
    cohort_city: CityId,
    used_by_cohort: bool,
}

fn accumulate(
    instance: &Instance,
    ctx: &Ctx<'_>,
    at: CityId,
    route: &mut Vec<CityId>,
) -> GraphResult<Volume> {
    if route.contains(&at) {
        return Err(GraphError::Cycle {
            tube: ctx.tube,
            city: at,
        });
    }
    route.push(at);

    let city = instance.city(at)?;
    let mut total = if at == ctx.cohort_city && !ctx.used_by_cohort {
        Volume::ZERO
    } else {
        city.demand(ctx.type_name)
    };
    for &id in &city.outgoing {
        let arc = instance.arc(id)?;
        if arc.tube == ctx.tube {
            total += accumulate(instance, ctx, arc.destination, route)?;
        }
    }

    route.pop();
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_graph::InstanceBuilder;

    // A (cohort) -> B -> C with demands 0/5/3 on SER.
    fn chain() -> (Instance, [CityId; 3], TubeId) {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER"]);
        let a = b.add_city(0, "A", None);
        let bb = b.add_city(1, "B", None);
        let c = b.add_city(2, "C", None);
        let cohort = b.add_cohort(a, 2).unwrap();
        let ser = b.add_type(cohort, "SER").unwrap();
        let tube = b.add_tube(ser, Volume::units(10)).unwrap();
        b.set_demand(a, "SER", Volume::units(4)).unwrap();
        b.set_demand(bb, "SER", Volume::units(5)).unwrap();
        b.set_demand(c, "SER", Volume::units(3)).unwrap();
        let mut instance = b.build().unwrap();
        instance.create_arc(a, bb, tube).unwrap();
        instance.create_arc(bb, c, tube).unwrap();
        (instance, [a, bb, c], tube)
    }

    #[test]
    fn chain_accumulates_downstream() {
        let (instance, [a, b, c], tube) = chain();
        assert_eq!(required_volume(&instance, a, tube).unwrap(), Volume::units(8));
        assert_eq!(required_volume(&instance, b, tube).unwrap(), Volume::units(8));
        assert_eq!(required_volume(&instance, c, tube).unwrap(), Volume::units(3));
    }

    #[test]
    fn cohort_demand_counts_when_drawn() {
        let (mut instance, [a, _, _], tube) = chain();
        instance.set_used_by_cohort(tube, true).unwrap();
        assert_eq!(required_volume(&instance, a, tube).unwrap(), Volume::units(12));
    }

    #[test]
    fn arc_quantity_is_downstream_need() {
        let (mut instance, _, _) = chain();
        let arcs: Vec<ArcId> = instance.arcs().map(|a| a.id).collect();
        update_arc_quantities(&mut instance, &arcs).unwrap();
        let quantities: Vec<Volume> = instance.arcs().map(|a| a.quantity).collect();
        assert_eq!(quantities, vec![Volume::units(8), Volume::units(3)]);
    }

    #[test]
    fn cycle_is_an_error() {
        let (mut instance, [a, b, c], tube) = chain();
        instance.create_arc(c, b, tube).unwrap();
        assert_eq!(
            required_volume(&instance, a, tube),
            Err(GraphError::Cycle { tube, city: b })
        );
    }
}
