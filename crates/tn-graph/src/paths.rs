//! Path queries restricted to the arcs of one tube.
//!
//! Each tube's arcs are expected to form a tree rooted at its cohort city.
//! The searches track the cities on the current route and report
//! [`GraphError::Cycle`] instead of recursing forever when an edit has closed
//! a loop.

use tn_core::{ArcId, CityId, TubeId};

use crate::error::{GraphError, GraphResult};
use crate::model::Instance;

/// True when `to` can be reached from `from` using only arcs of `tube`.
///
/// A city always reaches itself.
pub fn path_exists(instance: &Instance, from: CityId, to: CityId, tube: TubeId) -> GraphResult<bool> {
    instance.tube(tube)?;
    instance.city(to)?;
    let mut route = Vec::new();
    reaches(instance, from, to, tube, &mut route)
}

/// First arc chain found from `from` to `to` using only arcs of `tube`.
///
/// Outgoing arcs are explored in list order and the first successful chain is
/// returned, which is not necessarily the shortest. The chain is empty when
/// `to` is unreachable, and also when `from == to`.
pub fn find_path(
    instance: &Instance,
    from: CityId,
    to: CityId,
    tube: TubeId,
) -> GraphResult<Vec<ArcId>> {
    instance.tube(tube)?;
    instance.city(to)?;
    let mut route = Vec::new();
    let mut chain = Vec::new();
    if from != to {
        search(instance, from, to, tube, &mut route, &mut chain)?;
    }
    Ok(chain)
}

/// Number of hops on the chain [`find_path`] returns.
pub fn hop_count(instance: &Instance, from: CityId, to: CityId, tube: TubeId) -> GraphResult<usize> {
    Ok(find_path(instance, from, to, tube)?.len())
}

fn reaches(
    instance: &Instance,
    at: CityId,
    to: CityId,
    tube: TubeId,
    route: &mut Vec<CityId>,
) -> GraphResult<bool> {
    if at == to {
        return Ok(true);
    }
    enter(route, at, tube)?;
    for &id in &instance.city(at)?.outgoing {
        let arc = instance.arc(id)?;
        if arc.tube != tube {
            continue;
        }
        if arc.destination == to || reaches(instance, arc.destination, to, tube, route)? {
            return Ok(true);
        }
    }
    route.pop();
    Ok(false)
}

fn search(
    instance: &Instance,
    at: CityId,
    to: CityId,
    tube: TubeId,
    route: &mut Vec<CityId>,
    chain: &mut Vec<ArcId>,
) -> GraphResult<bool> {
    enter(route, at, tube)?;
    for &id in &instance.city(at)?.outgoing {
        let arc = instance.arc(id)?;
        if arc.tube != tube {
            continue;
        }
        chain.push(id);
        if arc.destination == to || search(instance, arc.destination, to, tube, route, chain)? {
            return Ok(true);
        }
        chain.pop();
    }
    route.pop();
    Ok(false)
}

fn enter(route: &mut Vec<CityId>, city: CityId, tube: TubeId) -> GraphResult<()> {
    if route.contains(&city) {
        return Err(GraphError::Cycle { tube, city });
    }
    route.push(city);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::InstanceBuilder;
    use tn_core::Volume;

    struct Fixture {
        instance: Instance,
        a: CityId,
        b: CityId,
        c: CityId,
        d: CityId,
        x: CityId,
        tube: TubeId,
        other: TubeId,
    }

    // A→B, B→C, A→D on `tube`; A→X on `other`.
    fn fixture() -> Fixture {
        let mut builder = InstanceBuilder::new();
        let a = builder.add_city(0, "A", None);
        let b = builder.add_city(1, "B", None);
        let c = builder.add_city(2, "C", None);
        let d = builder.add_city(3, "D", None);
        let x = builder.add_city(4, "X", None);
        let cohort = builder.add_cohort(a, 1).unwrap();
        let ty = builder.add_type(cohort, "SER").unwrap();
        let tube = builder.add_tube(ty, Volume::units(10)).unwrap();
        let other = builder.add_tube(ty, Volume::units(10)).unwrap();
        let mut instance = builder.build().unwrap();
        instance.create_arc(a, b, tube).unwrap();
        instance.create_arc(b, c, tube).unwrap();
        instance.create_arc(a, d, tube).unwrap();
        instance.create_arc(a, x, other).unwrap();
        Fixture {
            instance,
            a,
            b,
            c,
            d,
            x,
            tube,
            other,
        }
    }

    #[test]
    fn find_path_follows_first_branch() {
        let f = fixture();
        let path = find_path(&f.instance, f.a, f.c, f.tube).unwrap();
        let hops: Vec<(CityId, CityId)> = path
            .iter()
            .map(|&id| {
                let arc = f.instance.arc(id).unwrap();
                (arc.origin, arc.destination)
            })
            .collect();
        assert_eq!(hops, vec![(f.a, f.b), (f.b, f.c)]);
        assert!(path_exists(&f.instance, f.a, f.c, f.tube).unwrap());
    }

    #[test]
    fn other_tubes_are_ignored() {
        let f = fixture();
        assert!(find_path(&f.instance, f.a, f.x, f.tube).unwrap().is_empty());
        assert!(!path_exists(&f.instance, f.a, f.x, f.tube).unwrap());
        assert_eq!(hop_count(&f.instance, f.a, f.x, f.other).unwrap(), 1);
    }

    #[test]
    fn path_exists_agrees_with_find_path() {
        let f = fixture();
        for to in [f.b, f.c, f.d, f.x] {
            let found = !find_path(&f.instance, f.a, to, f.tube).unwrap().is_empty();
            assert_eq!(path_exists(&f.instance, f.a, to, f.tube).unwrap(), found);
        }
        // Arcs are directed
        assert!(!path_exists(&f.instance, f.c, f.a, f.tube).unwrap());
    }

    #[test]
    fn city_reaches_itself() {
        let f = fixture();
        assert!(path_exists(&f.instance, f.d, f.d, f.tube).unwrap());
        assert!(find_path(&f.instance, f.d, f.d, f.tube).unwrap().is_empty());
    }

    #[test]
    fn cycle_is_reported() {
        let mut f = fixture();
        f.instance.create_arc(f.c, f.a, f.tube).unwrap();
        let err = path_exists(&f.instance, f.a, f.x, f.tube).unwrap_err();
        assert!(matches!(err, GraphError::Cycle { tube, .. } if tube == f.tube));
        assert!(find_path(&f.instance, f.a, f.x, f.tube).is_err());
    }
}
