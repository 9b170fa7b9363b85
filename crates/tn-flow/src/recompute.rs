//! Cache refresh after graph edits.

use tn_core::ArcId;
use tn_graph::{GraphResult, Instance, Subscriber};
use tracing::{debug, warn};

use crate::aliquots::{AliquotReport, compute_aliquots};
use crate::volume::update_arc_quantities;

/// Recompute arc flows for `working_set` and every aliquot cache.
///
/// The aliquot caches are zeroed first. When the recompute fails (for example
/// a tube whose arcs now form a loop) they stay zeroed.
pub fn refresh(instance: &mut Instance, working_set: &[ArcId]) -> GraphResult<AliquotReport> {
    instance.reset_aliquots();
    update_arc_quantities(instance, working_set)?;

    let report = compute_aliquots(instance)?;
    for &(city, tube, count) in report.splits() {
        instance.record_aliquots(city, tube, count)?;
    }

    debug!(
        arcs = working_set.len(),
        aliquots = report.total(),
        "flows recomputed"
    );
    Ok(report)
}

/// Subscriber that keeps the flow and aliquot caches current.
pub fn subscriber() -> Subscriber {
    Box::new(|change, instance, working_set| {
        if let Err(err) = refresh(instance, working_set) {
            warn!(?change, %err, "flow recompute failed; caches left reset");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_core::{CityId, Volume};
    use tn_graph::{ArcGraph, InstanceBuilder};

    fn graph() -> (ArcGraph, [CityId; 4], tn_core::TubeId) {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER"]);
        let a = b.add_city(0, "A", None);
        let x = b.add_city(1, "X", None);
        let y = b.add_city(2, "Y", None);
        let z = b.add_city(3, "Z", None);
        let cohort = b.add_cohort(a, 3).unwrap();
        let ser = b.add_type(cohort, "SER").unwrap();
        let tube = b.add_tube(ser, Volume::units(30)).unwrap();
        for (city, need) in [(x, 2), (y, 4), (z, 6)] {
            b.set_demand(city, "SER", Volume::units(need)).unwrap();
        }
        let mut graph = ArcGraph::new(b.build().unwrap());
        graph.subscribe(subscriber());
        (graph, [a, x, y, z], tube)
    }

    #[test]
    fn caches_follow_edits() {
        let (mut graph, [a, x, y, z], tube) = graph();
        let ax = graph.create_arc(a, x, tube).unwrap();
        graph.add_arc(ax).unwrap();
        assert_eq!(graph.instance().arc(ax).unwrap().quantity, Volume::units(2));

        let xy = graph.create_arc(x, y, tube).unwrap();
        graph.add_arc(xy).unwrap();
        let xz = graph.create_arc(x, z, tube).unwrap();
        graph.add_arc(xz).unwrap();

        let instance = graph.instance();
        assert_eq!(instance.arc(ax).unwrap().quantity, Volume::units(12));
        assert_eq!(instance.city(x).unwrap().aliquots, 3);
        assert_eq!(instance.tube(tube).unwrap().aliquots, 3);
        assert_eq!(instance.solution().aliquots, 3);

        graph.delete_arc(xz).unwrap();
        let instance = graph.instance();
        assert_eq!(instance.arc(ax).unwrap().quantity, Volume::units(6));
        assert_eq!(instance.city(x).unwrap().aliquots, 0);
        assert_eq!(instance.solution().aliquots, 0);
    }

    #[test]
    fn loop_leaves_caches_reset() {
        let (mut graph, [a, x, y, _], tube) = graph();
        for (from, to) in [(a, x), (x, y), (x, a)] {
            let arc = graph.create_arc(from, to, tube).unwrap();
            graph.add_arc(arc).unwrap();
        }
        assert_eq!(graph.instance().solution().aliquots, 0);
        let working: Vec<_> = graph.working_set().to_vec();
        let mut instance = graph.into_instance();
        assert!(refresh(&mut instance, &working).is_err());
    }
}
