//! Incremental instance builder.

use std::collections::HashMap;
use tn_core::{CityId, CohortId, TubeId, TypeId, Volume};

use crate::error::{GraphError, GraphResult};
use crate::model::{City, Cohort, GeoPoint, Instance, SampleType, Solution, Tube};
use crate::validate;

/// Builder for constructing an instance incrementally.
///
/// Add cities first, then cohorts, their types and tubes, then demands.
/// `build()` validates the structure and returns an [`Instance`] with no arcs.
#[derive(Debug, Default)]
pub struct InstanceBuilder {
    cities: Vec<City>,
    cohorts: Vec<Cohort>,
    types: Vec<SampleType>,
    tubes: Vec<Tube>,
    type_names: Vec<String>,
    max_freezes: u32,
}

impl InstanceBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global type vocabulary.
    pub fn set_type_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_names = names.into_iter().map(Into::into).collect();
    }

    pub fn set_max_freezes(&mut self, max_freezes: u32) {
        self.max_freezes = max_freezes;
    }

    /// Add a city and return its ID.
    pub fn add_city(
        &mut self,
        number: u32,
        name: impl Into<String>,
        position: Option<GeoPoint>,
    ) -> CityId {
        let id = CityId::from_index(self.cities.len() as u32);
        self.cities.push(City {
            id,
            number,
            name: name.into(),
            position,
            cohort: None,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            demands: HashMap::new(),
            aliquots: 0,
        });
        id
    }

    /// Add a cohort originating at `city`.
    pub fn add_cohort(&mut self, city: CityId, patients: u32) -> GraphResult<CohortId> {
        let id = CohortId::for_slot(self.cohorts.len())?;
        let host = self
            .cities
            .get_mut(city.index())
            .ok_or(GraphError::UnknownCity(city))?;
        if host.cohort.is_some() {
            return Err(GraphError::CohortCityTaken { city });
        }
        host.cohort = Some(id);
        self.cohorts.push(Cohort {
            id,
            city,
            patients,
            types: Vec::new(),
        });
        Ok(id)
    }

    /// Add a sample type served by `cohort`.
    pub fn add_type(&mut self, cohort: CohortId, name: impl Into<String>) -> GraphResult<TypeId> {
        let id = TypeId::for_slot(self.types.len())?;
        self.cohorts
            .get_mut(cohort.index())
            .ok_or(GraphError::UnknownCohort(cohort))?
            .types
            .push(id);
        self.types.push(SampleType {
            id,
            name: name.into(),
            cohort,
            tubes: Vec::new(),
        });
        Ok(id)
    }

    /// Add the next tube of a type; tubes are numbered from 1 in insertion order.
    pub fn add_tube(&mut self, sample_type: TypeId, volume: Volume) -> GraphResult<TubeId> {
        let id = TubeId::for_slot(self.tubes.len())?;
        let owner = self
            .types
            .get_mut(sample_type.index())
            .ok_or(GraphError::UnknownType(sample_type))?;
        owner.tubes.push(id);
        self.tubes.push(Tube {
            id,
            number: owner.tubes.len() as u32,
            volume,
            used_by_cohort: false,
            sample_type,
            visits: Vec::new(),
            arcs: Vec::new(),
            aliquots: 0,
        });
        Ok(id)
    }

    /// Record the volume of `type_name` that `city` requires.
    pub fn set_demand(
        &mut self,
        city: CityId,
        type_name: impl Into<String>,
        volume: Volume,
    ) -> GraphResult<()> {
        self.cities
            .get_mut(city.index())
            .ok_or(GraphError::UnknownCity(city))?
            .demands
            .insert(type_name.into(), volume);
        Ok(())
    }

    /// Validate and freeze the structure into an [`Instance`].
    pub fn build(self) -> GraphResult<Instance> {
        validate::validate_structure(
            &self.cities,
            &self.cohorts,
            &self.types,
            &self.tubes,
            &self.type_names,
        )?;

        Ok(Instance {
            cities: self.cities,
            cohorts: self.cohorts,
            types: self.types,
            tubes: self.tubes,
            arcs: Vec::new(),
            type_names: self.type_names,
            max_freezes: self.max_freezes,
            solution: Solution::default(),
        })
    }
}
