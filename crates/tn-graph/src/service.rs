//! The arc graph service: the only place arcs are edited during a session.
//!
//! [`ArcGraph`] owns the instance, the working set of arcs currently being
//! edited, and a list of subscribers. Every editing operation applies its whole
//! mutation first and then calls each subscriber once, in registration order,
//! before returning.

use tn_core::{ArcId, CityId, TubeId};
use tracing::debug;

use crate::error::GraphResult;
use crate::model::{Arc, Instance};
use crate::paths;

/// What changed in the arc set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcChange {
    Added { arc: ArcId, tube: TubeId },
    Rerouted { arc: ArcId, tube: TubeId },
    Deleted { arc: ArcId, tube: TubeId },
    /// A tube property that feeds the derived values changed.
    TubeEdited(TubeId),
    /// The working set was replaced wholesale (new selection).
    WorkingSetReplaced,
}

impl ArcChange {
    /// The tube concerned, if the change is about a single tube.
    pub fn tube(self) -> Option<TubeId> {
        match self {
            ArcChange::Added { tube, .. }
            | ArcChange::Rerouted { tube, .. }
            | ArcChange::Deleted { tube, .. }
            | ArcChange::TubeEdited(tube) => Some(tube),
            ArcChange::WorkingSetReplaced => None,
        }
    }
}

/// Callback run after each change. It may update derived caches on the
/// instance (flows, aliquot counts); it receives the current working set.
pub type Subscriber = Box<dyn FnMut(&ArcChange, &mut Instance, &[ArcId])>;

pub struct ArcGraph {
    instance: Instance,
    working_set: Vec<ArcId>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for ArcGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcGraph")
            .field("instance", &self.instance)
            .field("working_set", &self.working_set)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ArcGraph {
    /// Wrap a fully loaded instance. The working set starts empty.
    pub fn new(instance: Instance) -> Self {
        Self {
            instance,
            working_set: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn into_instance(self) -> Instance {
        self.instance
    }

    /// Arcs currently selected for display and editing.
    pub fn working_set(&self) -> &[ArcId] {
        &self.working_set
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    /// Replace the working set. Unknown arcs are rejected.
    pub fn set_working_set(&mut self, arcs: Vec<ArcId>) -> GraphResult<()> {
        for &id in &arcs {
            self.instance.arc(id)?;
        }
        self.working_set = arcs;
        self.notify(ArcChange::WorkingSetReplaced);
        Ok(())
    }

    /// Build an arc registered with its endpoints and tube. Nothing is emitted;
    /// call [`ArcGraph::add_arc`] to put it in the working set.
    pub fn create_arc(
        &mut self,
        origin: CityId,
        destination: CityId,
        tube: TubeId,
    ) -> GraphResult<ArcId> {
        self.instance.create_arc(origin, destination, tube)
    }

    /// Put an arc in the working set and its tube's list.
    pub fn add_arc(&mut self, arc: ArcId) -> GraphResult<()> {
        self.instance.attach_to_tube(arc)?;
        let tube = self.instance.arc(arc)?.tube;
        if !self.working_set.contains(&arc) {
            self.working_set.push(arc);
        }
        self.notify(ArcChange::Added { arc, tube });
        Ok(())
    }

    pub fn set_arc_origin(&mut self, arc: ArcId, new_origin: CityId) -> GraphResult<()> {
        self.instance.reroute_origin(arc, new_origin)?;
        let tube = self.instance.arc(arc)?.tube;
        self.notify(ArcChange::Rerouted { arc, tube });
        Ok(())
    }

    pub fn set_arc_destination(&mut self, arc: ArcId, new_destination: CityId) -> GraphResult<()> {
        self.instance.reroute_destination(arc, new_destination)?;
        let tube = self.instance.arc(arc)?.tube;
        self.notify(ArcChange::Rerouted { arc, tube });
        Ok(())
    }

    /// Remove an arc from its endpoints, its tube and the working set.
    pub fn delete_arc(&mut self, arc: ArcId) -> GraphResult<Arc> {
        let removed = self.instance.remove_arc(arc)?;
        self.working_set.retain(|&a| a != arc);
        self.notify(ArcChange::Deleted {
            arc,
            tube: removed.tube,
        });
        Ok(removed)
    }

    pub fn path_exists(&self, from: CityId, to: CityId, tube: TubeId) -> GraphResult<bool> {
        paths::path_exists(&self.instance, from, to, tube)
    }

    pub fn find_path(&self, from: CityId, to: CityId, tube: TubeId) -> GraphResult<Vec<ArcId>> {
        paths::find_path(&self.instance, from, to, tube)
    }

    /// Set whether the cohort draws from `tube`; notifies as a tube edit
    /// since the flag changes the volumes the tube must carry.
    pub fn set_used_by_cohort(&mut self, tube: TubeId, used: bool) -> GraphResult<()> {
        self.instance.set_used_by_cohort(tube, used)?;
        self.notify(ArcChange::TubeEdited(tube));
        Ok(())
    }

    fn notify(&mut self, change: ArcChange) {
        debug!(?change, subscribers = self.subscribers.len(), "arc set changed");
        for subscriber in &mut self.subscribers {
            subscriber(&change, &mut self.instance, &self.working_set);
        }
    }
}

impl From<ArcGraph> for Instance {
    fn from(graph: ArcGraph) -> Self {
        graph.into_instance()
    }
}
