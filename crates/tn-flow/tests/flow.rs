//! Flow and aliquot properties over generated delivery trees.

use proptest::prelude::*;
use tn_core::{CityId, TubeId, Volume};
use tn_flow::{compute_aliquots, required_volume};
use tn_graph::{Instance, InstanceBuilder};

/// A tube tree rooted at city 0: city `i + 1` hangs under `parents[i]`.
fn tree(parents: &[usize], demands: &[u64], patients: u32) -> (Instance, Vec<CityId>, TubeId) {
    let mut b = InstanceBuilder::new();
    b.set_type_names(["SER"]);
    let cities: Vec<CityId> = (0..=parents.len())
        .map(|n| b.add_city(n as u32, format!("C{n}"), None))
        .collect();
    let cohort = b.add_cohort(cities[0], patients).unwrap();
    let ser = b.add_type(cohort, "SER").unwrap();
    let tube = b.add_tube(ser, Volume::units(1_000_000)).unwrap();
    for (city, &d) in cities.iter().zip(demands) {
        b.set_demand(*city, "SER", Volume::from_milli(d)).unwrap();
    }
    let mut instance = b.build().unwrap();
    for (child, &parent) in parents.iter().enumerate() {
        instance
            .create_arc(cities[parent], cities[child + 1], tube)
            .unwrap();
    }
    (instance, cities, tube)
}

/// Parent of node `i + 1` is any node in `0..=i`.
fn parents() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..12)
        .prop_map(|picks| picks.iter().enumerate().map(|(i, p)| p.index(i + 1)).collect())
}

proptest! {
    #[test]
    fn root_needs_every_downstream_demand(
        parents in parents(),
        demands in prop::collection::vec(0u64..10_000, 13),
    ) {
        let (instance, cities, tube) = tree(&parents, &demands, 1);
        // The cohort does not draw from the tube, so its own demand is ignored.
        let expected: u64 = demands[1..=parents.len()].iter().sum();
        prop_assert_eq!(
            required_volume(&instance, cities[0], tube).unwrap(),
            Volume::from_milli(expected)
        );
    }

    #[test]
    fn aliquots_are_extra_branches_times_patients(
        parents in parents(),
        patients in 1u32..50,
    ) {
        let (instance, cities, tube) = tree(&parents, &[], patients);
        let mut children = vec![0u64; cities.len()];
        for &p in &parents {
            children[p] += 1;
        }
        let expected: u64 = children
            .iter()
            .map(|&n| n.saturating_sub(1) * u64::from(patients))
            .sum();

        let report = compute_aliquots(&instance).unwrap();
        prop_assert_eq!(report.total(), expected);
        prop_assert_eq!(report.tube(tube), expected);
        for (city, &n) in cities.iter().zip(&children) {
            prop_assert_eq!(report.city(*city), n.saturating_sub(1) * u64::from(patients));
        }
    }
}
