//! Core domain data structures.
//!
//! All entities live in flat arenas owned by [`Instance`] and refer to each
//! other through typed ids. Structure (cities, cohorts, types, tubes) is fixed
//! once built; arcs come and go while a solution is edited.

use std::collections::HashMap;

use tn_core::{ArcId, CityId, CohortId, TubeId, TypeId, Volume};

use crate::error::{GraphError, GraphResult};

/// Geographic position of a city, as read from the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A city of the network.
///
/// `outgoing` and `incoming` mirror the arcs whose origin / destination is this
/// city; they are maintained by the arc primitives only.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: CityId,
    /// Number used by the instance and solution files.
    pub number: u32,
    pub name: String,
    pub position: Option<GeoPoint>,
    /// Set when a cohort originates here.
    pub cohort: Option<CohortId>,
    pub outgoing: Vec<ArcId>,
    pub incoming: Vec<ArcId>,
    /// Required volume per type name.
    pub demands: HashMap<String, Volume>,
    /// Last computed aliquot count (cache).
    pub aliquots: u64,
}

impl City {
    /// Name decorated with the city number, e.g. `Lyon [4]`.
    pub fn display_name(&self) -> String {
        format!("{} [{}]", self.name, self.number)
    }

    /// Raw demand for a type; missing entries count as zero.
    pub fn demand(&self, type_name: &str) -> Volume {
        self.demands.get(type_name).copied().unwrap_or(Volume::ZERO)
    }
}

/// Patients whose samples leave from one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    pub id: CohortId,
    pub city: CityId,
    pub patients: u32,
    pub types: Vec<TypeId>,
}

/// A sample type as served by one cohort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleType {
    pub id: TypeId,
    pub name: String,
    pub cohort: CohortId,
    pub tubes: Vec<TubeId>,
}

/// One physical tube of fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tube {
    pub id: TubeId,
    /// 1-based number within its type.
    pub number: u32,
    pub volume: Volume,
    /// The cohort draws from this tube before shipping it.
    pub used_by_cohort: bool,
    pub sample_type: TypeId,
    /// Cities the tube visits, in visitation order (informational).
    pub visits: Vec<CityId>,
    pub arcs: Vec<ArcId>,
    /// Last computed aliquot count (cache).
    pub aliquots: u64,
}

/// A directed shipment leg owned by one tube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arc {
    pub id: ArcId,
    pub origin: CityId,
    pub destination: CityId,
    pub tube: TubeId,
    /// Volume carried, i.e. everything downstream needs (cache).
    pub quantity: Volume,
}

impl Arc {
    pub fn is_self_loop(&self) -> bool {
        self.origin == self.destination
    }
}

/// Solution-wide derived totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Solution {
    pub aliquots: u64,
}

/// The aggregate root: every entity of one planning problem and its solution.
#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub(crate) cities: Vec<City>,
    pub(crate) cohorts: Vec<Cohort>,
    pub(crate) types: Vec<SampleType>,
    pub(crate) tubes: Vec<Tube>,
    /// Arc slots; deleted arcs leave `None` so ids stay stable.
    pub(crate) arcs: Vec<Option<Arc>>,
    pub(crate) type_names: Vec<String>,
    pub(crate) max_freezes: u32,
    pub(crate) solution: Solution,
}

impl Instance {
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    pub fn types(&self) -> &[SampleType] {
        &self.types
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// Global type vocabulary, in file order.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Maximum number of hops allowed from a cohort along any tube.
    pub fn max_freezes(&self) -> u32 {
        self.max_freezes
    }

    pub fn solution(&self) -> Solution {
        self.solution
    }

    /// Iterate over live arcs in creation order.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter().flatten()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs().count()
    }

    pub fn city(&self, id: CityId) -> GraphResult<&City> {
        self.cities.get(id.index()).ok_or(GraphError::UnknownCity(id))
    }

    pub fn cohort(&self, id: CohortId) -> GraphResult<&Cohort> {
        self.cohorts.get(id.index()).ok_or(GraphError::UnknownCohort(id))
    }

    pub fn sample_type(&self, id: TypeId) -> GraphResult<&SampleType> {
        self.types.get(id.index()).ok_or(GraphError::UnknownType(id))
    }

    pub fn tube(&self, id: TubeId) -> GraphResult<&Tube> {
        self.tubes.get(id.index()).ok_or(GraphError::UnknownTube(id))
    }

    pub fn arc(&self, id: ArcId) -> GraphResult<&Arc> {
        self.arcs
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(GraphError::UnknownArc(id))
    }

    /// Find a city by the number used in the text files.
    pub fn find_city_by_number(&self, number: u32) -> Option<CityId> {
        self.cities.iter().find(|c| c.number == number).map(|c| c.id)
    }

    /// Find a city by raw name or by its decorated `name [number]` form.
    pub fn find_city_by_name(&self, name: &str) -> Option<CityId> {
        self.cities
            .iter()
            .find(|c| c.name == name || c.display_name() == name)
            .map(|c| c.id)
    }

    /// Type of a tube.
    pub fn tube_type(&self, tube: TubeId) -> GraphResult<&SampleType> {
        self.sample_type(self.tube(tube)?.sample_type)
    }

    /// Cohort owning a tube.
    pub fn tube_cohort(&self, tube: TubeId) -> GraphResult<&Cohort> {
        self.cohort(self.tube_type(tube)?.cohort)
    }

    /// City a tube leaves from.
    pub fn tube_origin(&self, tube: TubeId) -> GraphResult<CityId> {
        Ok(self.tube_cohort(tube)?.city)
    }

    /// Find a tube by cohort index, type name and tube number.
    pub fn find_tube(&self, cohort_index: usize, type_name: &str, number: u32) -> Option<TubeId> {
        let cohort = self.cohorts.get(cohort_index)?;
        cohort
            .types
            .iter()
            .filter_map(|t| self.types.get(t.index()))
            .find(|t| t.name == type_name)?
            .tubes
            .iter()
            .filter_map(|t| self.tubes.get(t.index()))
            .find(|t| t.number == number)
            .map(|t| t.id)
    }

    /// Tubes in (cohort, type, tube) order, the order used by the solution file.
    pub fn tubes_in_file_order(&self) -> impl Iterator<Item = &Tube> {
        self.cohorts
            .iter()
            .flat_map(|c| c.types.iter())
            .filter_map(|t| self.types.get(t.index()))
            .flat_map(|t| t.tubes.iter())
            .filter_map(|t| self.tubes.get(t.index()))
    }

    /// Every arc of every tube under a cohort.
    pub fn cohort_arcs(&self, cohort: CohortId) -> GraphResult<Vec<ArcId>> {
        let mut arcs = Vec::new();
        for &ty in &self.cohort(cohort)?.types {
            arcs.extend(self.type_arcs(ty)?);
        }
        Ok(arcs)
    }

    /// Every arc of every tube of a type.
    pub fn type_arcs(&self, sample_type: TypeId) -> GraphResult<Vec<ArcId>> {
        let mut arcs = Vec::new();
        for &tube in &self.sample_type(sample_type)?.tubes {
            arcs.extend_from_slice(&self.tube(tube)?.arcs);
        }
        Ok(arcs)
    }

    /// Store the flow computed for an arc.
    pub fn set_arc_quantity(&mut self, arc: ArcId, quantity: Volume) -> GraphResult<()> {
        let slot = self
            .arcs
            .get_mut(arc.index())
            .and_then(Option::as_mut)
            .ok_or(GraphError::UnknownArc(arc))?;
        slot.quantity = quantity;
        Ok(())
    }

    /// Zero every aliquot cache before a recount.
    pub fn reset_aliquots(&mut self) {
        for city in &mut self.cities {
            city.aliquots = 0;
        }
        for tube in &mut self.tubes {
            tube.aliquots = 0;
        }
        self.solution.aliquots = 0;
    }

    /// Credit aliquots produced at `city` by `tube` to the city, tube and solution caches.
    pub fn record_aliquots(&mut self, city: CityId, tube: TubeId, count: u64) -> GraphResult<()> {
        self.cities
            .get_mut(city.index())
            .ok_or(GraphError::UnknownCity(city))?
            .aliquots += count;
        self.tubes
            .get_mut(tube.index())
            .ok_or(GraphError::UnknownTube(tube))?
            .aliquots += count;
        self.solution.aliquots += count;
        Ok(())
    }

    pub fn set_used_by_cohort(&mut self, tube: TubeId, used: bool) -> GraphResult<()> {
        self.tube_mut(tube)?.used_by_cohort = used;
        Ok(())
    }

    pub fn set_tube_visits(&mut self, tube: TubeId, visits: Vec<CityId>) -> GraphResult<()> {
        for &city in &visits {
            self.city(city)?;
        }
        self.tube_mut(tube)?.visits = visits;
        Ok(())
    }

    /// Rebuild a tube's visit list from its arcs.
    ///
    /// Origins and destinations are listed in arc order without duplicates. The
    /// cohort city is listed first when the cohort draws from the tube, and left
    /// out otherwise.
    pub fn refresh_tube_visits(&mut self, tube: TubeId) -> GraphResult<()> {
        let cohort_city = self.tube_origin(tube)?;
        let t = self.tube(tube)?;
        let mut visits = Vec::new();
        if t.used_by_cohort {
            visits.push(cohort_city);
        }
        for &arc in &t.arcs {
            let arc = self.arc(arc)?;
            for city in [arc.origin, arc.destination] {
                if city != cohort_city && !visits.contains(&city) {
                    visits.push(city);
                }
            }
        }
        self.tube_mut(tube)?.visits = visits;
        Ok(())
    }

    pub(crate) fn city_mut(&mut self, id: CityId) -> GraphResult<&mut City> {
        self.cities.get_mut(id.index()).ok_or(GraphError::UnknownCity(id))
    }

    pub(crate) fn tube_mut(&mut self, id: TubeId) -> GraphResult<&mut Tube> {
        self.tubes.get_mut(id.index()).ok_or(GraphError::UnknownTube(id))
    }

    pub(crate) fn arc_mut(&mut self, id: ArcId) -> GraphResult<&mut Arc> {
        self.arcs
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(GraphError::UnknownArc(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::InstanceBuilder;

    #[test]
    fn display_name_is_decorated() {
        let mut b = InstanceBuilder::new();
        let lyon = b.add_city(4, "Lyon", None);
        let instance = b.build().unwrap();
        assert_eq!(instance.city(lyon).unwrap().display_name(), "Lyon [4]");
        assert_eq!(instance.find_city_by_name("Lyon [4]"), Some(lyon));
        assert_eq!(instance.find_city_by_name("Lyon"), Some(lyon));
    }

    #[test]
    fn lookups_signal_absence() {
        let mut b = InstanceBuilder::new();
        b.add_city(0, "A", None);
        let instance = b.build().unwrap();
        assert_eq!(instance.find_city_by_number(9), None);
        assert_eq!(instance.find_city_by_name("Nowhere"), None);
        let bogus = CityId::from_index(99);
        assert_eq!(instance.city(bogus), Err(GraphError::UnknownCity(bogus)));
    }

    #[test]
    fn missing_demand_is_zero() {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER"]);
        let a = b.add_city(0, "A", None);
        let instance = b.build().unwrap();
        assert_eq!(instance.city(a).unwrap().demand("SER"), Volume::ZERO);
    }

    #[test]
    fn refresh_visits_skips_unused_cohort_city() {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER"]);
        let a = b.add_city(0, "A", None);
        let x = b.add_city(1, "X", None);
        let y = b.add_city(2, "Y", None);
        let cohort = b.add_cohort(a, 10).unwrap();
        let ty = b.add_type(cohort, "SER").unwrap();
        let tube = b.add_tube(ty, Volume::units(20)).unwrap();
        let mut instance = b.build().unwrap();

        instance.create_arc(a, x, tube).unwrap();
        instance.create_arc(x, y, tube).unwrap();

        instance.refresh_tube_visits(tube).unwrap();
        assert_eq!(instance.tube(tube).unwrap().visits, vec![x, y]);

        instance.set_used_by_cohort(tube, true).unwrap();
        instance.refresh_tube_visits(tube).unwrap();
        assert_eq!(instance.tube(tube).unwrap().visits, vec![a, x, y]);
    }
}
