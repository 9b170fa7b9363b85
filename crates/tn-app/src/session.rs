//! Editing session over one loaded instance.
//!
//! A [`Session`] exists only once every input is parsed. It owns the arc graph
//! service with two subscribers registered: one rebuilding the visit list of
//! the tube an edit touched, one refreshing flows and aliquot counts.

use std::path::Path;

use tn_check::{DrawPolicy, Violation, check_solution};
use tn_core::{ArcId, CityId, CohortId, TubeId, TypeId, Volume};
use tn_flow::{AliquotReport, compute_aliquots, required_volume};
use tn_graph::{ArcChange, ArcGraph, Instance};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};
use crate::summary::{SolutionSummary, summarize};

/// What the working set currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Nothing,
    All,
    Cohort(CohortId),
    Type(TypeId),
    Tube(TubeId),
}

#[derive(Debug)]
pub struct Session {
    graph: ArcGraph,
    policy: DrawPolicy,
    selection: Selection,
}

impl Session {
    /// Start editing `instance`. Every arc is selected so the initial flows are computed.
    pub fn new(instance: Instance, policy: DrawPolicy) -> AppResult<Self> {
        let mut graph = ArcGraph::new(instance);
        graph.subscribe(Box::new(refresh_visits));
        graph.subscribe(tn_flow::subscriber());

        let mut session = Self {
            graph,
            policy,
            selection: Selection::Nothing,
        };
        session.select_all()?;
        Ok(session)
    }

    /// Load every input named by `config`.
    pub fn open(config: &SessionConfig) -> AppResult<Self> {
        let mut instance = tn_format::load_instance(
            &config.instance,
            config.map.as_deref(),
            config.types.as_deref(),
        )
        .map_err(|e| AppError::Load {
            what: "instance",
            message: e.to_string(),
        })?;
        if let Some(path) = &config.solution {
            tn_format::load_solution(path, &mut instance).map_err(|e| AppError::Load {
                what: "solution",
                message: e.to_string(),
            })?;
        }
        info!(
            cities = instance.cities().len(),
            arcs = instance.arc_count(),
            policy = ?config.draw_policy,
            "session opened"
        );
        Self::new(instance, config.draw_policy)
    }

    pub fn instance(&self) -> &Instance {
        self.graph.instance()
    }

    pub fn working_set(&self) -> &[ArcId] {
        self.graph.working_set()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }

    pub fn select_all(&mut self) -> AppResult<()> {
        let arcs = self.instance().arcs().map(|a| a.id).collect();
        self.select(Selection::All, arcs)
    }

    /// Show the arcs of every tube of a cohort.
    pub fn select_cohort(&mut self, cohort: CohortId) -> AppResult<()> {
        let arcs = self.instance().cohort_arcs(cohort)?;
        self.select(Selection::Cohort(cohort), arcs)
    }

    /// Show the arcs of every tube of a type.
    pub fn select_type(&mut self, sample_type: TypeId) -> AppResult<()> {
        let arcs = self.instance().type_arcs(sample_type)?;
        self.select(Selection::Type(sample_type), arcs)
    }

    pub fn select_tube(&mut self, tube: TubeId) -> AppResult<()> {
        let arcs = self.instance().tube(tube)?.arcs.clone();
        self.select(Selection::Tube(tube), arcs)
    }

    pub fn clear_selection(&mut self) -> AppResult<()> {
        self.select(Selection::Nothing, Vec::new())
    }

    /// Create an arc and put it in the working set.
    pub fn add_arc(&mut self, origin: CityId, destination: CityId, tube: TubeId) -> AppResult<ArcId> {
        let arc = self.graph.create_arc(origin, destination, tube)?;
        self.graph.add_arc(arc)?;
        Ok(arc)
    }

    pub fn set_arc_origin(&mut self, arc: ArcId, origin: CityId) -> AppResult<()> {
        Ok(self.graph.set_arc_origin(arc, origin)?)
    }

    pub fn set_arc_destination(&mut self, arc: ArcId, destination: CityId) -> AppResult<()> {
        Ok(self.graph.set_arc_destination(arc, destination)?)
    }

    pub fn delete_arc(&mut self, arc: ArcId) -> AppResult<()> {
        self.graph.delete_arc(arc)?;
        Ok(())
    }

    pub fn set_used_by_cohort(&mut self, tube: TubeId, used: bool) -> AppResult<()> {
        Ok(self.graph.set_used_by_cohort(tube, used)?)
    }

    /// Volume the tube must hold to serve everything downstream of its cohort.
    pub fn required_volume(&self, tube: TubeId) -> AppResult<Volume> {
        let origin = self.instance().tube_origin(tube)?;
        Ok(required_volume(self.instance(), origin, tube)?)
    }

    pub fn aliquots(&self) -> AppResult<AliquotReport> {
        Ok(compute_aliquots(self.instance())?)
    }

    /// Arc chain from one city number to another along a tube.
    pub fn find_path(&self, from: u32, to: u32, tube: TubeId) -> AppResult<Vec<ArcId>> {
        let from = self.city_by_number(from)?;
        let to = self.city_by_number(to)?;
        Ok(self.graph.find_path(from, to, tube)?)
    }

    /// Resolve a tube written `cohort/type/number`, e.g. `0/SER/2`.
    pub fn find_tube(&self, label: &str) -> AppResult<TubeId> {
        let parts: Vec<&str> = label.split('/').collect();
        let [cohort, type_name, number] = parts[..] else {
            return Err(AppError::InvalidInput(format!(
                "tube '{label}' is not of the form cohort/type/number"
            )));
        };
        let cohort: usize = cohort
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("bad cohort index '{cohort}'")))?;
        let number: u32 = number
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("bad tube number '{number}'")))?;
        self.instance()
            .find_tube(cohort, type_name, number)
            .ok_or_else(|| AppError::TubeNotFound(label.to_string()))
    }

    pub fn city_by_number(&self, number: u32) -> AppResult<CityId> {
        self.instance()
            .find_city_by_number(number)
            .ok_or(AppError::CityNotFound(number))
    }

    /// Run every feasibility rule with the session's draw policy.
    pub fn check(&self) -> Result<(), Violation> {
        check_solution(self.instance(), self.policy)
    }

    /// Validate, then export. Nothing is exported from an infeasible solution.
    pub fn save(&self) -> AppResult<String> {
        if let Err(violation) = self.check() {
            warn!(%violation, "save refused");
            return Err(violation.into());
        }
        Ok(tn_format::write_solution(self.instance())?)
    }

    /// [`Session::save`] and write the text to `path`.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let content = self.save()?;
        std::fs::write(path, content).map_err(|e| AppError::SolutionWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!(path = %path.display(), "solution saved");
        Ok(())
    }

    pub fn summary(&self) -> AppResult<SolutionSummary> {
        summarize(self.instance())
    }

    pub fn into_instance(self) -> Instance {
        self.graph.into_instance()
    }

    fn select(&mut self, selection: Selection, arcs: Vec<ArcId>) -> AppResult<()> {
        self.graph.set_working_set(arcs)?;
        self.selection = selection;
        Ok(())
    }
}

fn refresh_visits(change: &ArcChange, instance: &mut Instance, _: &[ArcId]) {
    if let Some(tube) = change.tube()
        && let Err(err) = instance.refresh_tube_visits(tube)
    {
        warn!(%tube, %err, "tube visits not refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_graph::InstanceBuilder;

    fn session() -> (Session, Vec<CityId>, [TubeId; 3]) {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER", "PLA"]);
        b.set_max_freezes(3);
        let cities: Vec<CityId> = (0..4)
            .map(|n| b.add_city(n, format!("City {n}"), None))
            .collect();
        let cohort = b.add_cohort(cities[0], 5).unwrap();
        let ser = b.add_type(cohort, "SER").unwrap();
        let pla = b.add_type(cohort, "PLA").unwrap();
        let s1 = b.add_tube(ser, Volume::units(10)).unwrap();
        let s2 = b.add_tube(ser, Volume::units(10)).unwrap();
        let p1 = b.add_tube(pla, Volume::units(10)).unwrap();
        b.set_demand(cities[1], "SER", Volume::units(2)).unwrap();
        let mut instance = b.build().unwrap();
        instance.create_arc(cities[0], cities[1], s1).unwrap();
        instance.create_arc(cities[0], cities[2], p1).unwrap();
        (
            Session::new(instance, DrawPolicy::AtMostOne).unwrap(),
            cities,
            [s1, s2, p1],
        )
    }

    #[test]
    fn starts_with_everything_selected() {
        let (session, _, _) = session();
        assert_eq!(session.selection(), Selection::All);
        assert_eq!(session.working_set().len(), 2);
        let first = session.instance().arcs().next().unwrap();
        assert_eq!(first.quantity, Volume::units(2));
    }

    #[test]
    fn selection_narrows_the_working_set() {
        let (mut session, _, [s1, s2, p1]) = session();
        let ser = session.instance().tube(s1).unwrap().sample_type;
        session.select_type(ser).unwrap();
        assert_eq!(session.working_set().len(), 1);
        session.select_tube(s2).unwrap();
        assert!(session.working_set().is_empty());
        session.select_tube(p1).unwrap();
        assert_eq!(session.selection(), Selection::Tube(p1));
        session.clear_selection().unwrap();
        assert_eq!(session.selection(), Selection::Nothing);
        assert!(session.working_set().is_empty());
    }

    #[test]
    fn edits_refresh_visits() {
        let (mut session, c, [s1, ..]) = session();
        let arc = session.add_arc(c[1], c[3], s1).unwrap();
        assert_eq!(session.instance().tube(s1).unwrap().visits, vec![c[1], c[3]]);

        session.set_arc_destination(arc, c[2]).unwrap();
        assert_eq!(session.instance().tube(s1).unwrap().visits, vec![c[1], c[2]]);

        session.set_used_by_cohort(s1, true).unwrap();
        assert_eq!(session.instance().tube(s1).unwrap().visits, vec![c[0], c[1], c[2]]);
    }

    #[test]
    fn tube_labels() {
        let (session, _, [_, s2, _]) = session();
        assert_eq!(session.find_tube("0/SER/2").unwrap(), s2);
        assert!(matches!(session.find_tube("0/SER/9"), Err(AppError::TubeNotFound(_))));
        assert!(matches!(session.find_tube("SER"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn save_is_refused_when_infeasible() {
        let (mut session, c, [s1, ..]) = session();
        assert!(session.save().is_ok());

        session.add_arc(c[3], c[3], s1).unwrap();
        let err = session.save().unwrap_err();
        assert!(matches!(err, AppError::Infeasible(Violation::SelfLoop { .. })));
    }
}
