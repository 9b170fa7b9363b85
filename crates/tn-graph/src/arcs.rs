//! Arc primitives on the instance arenas.
//!
//! Each primitive checks every id it needs before touching any list, so a
//! failed call leaves the instance unchanged and a successful one leaves the
//! outgoing/incoming/tube mirrors consistent.

use tn_core::{ArcId, CityId, TubeId, Volume};
use tracing::debug;

use crate::error::GraphResult;
use crate::model::{Arc, Instance};
use crate::validate;

impl Instance {
    /// Build an arc and register it with its origin, destination and tube.
    ///
    /// No feasibility check is made: a self-loop or an arc back to the cohort
    /// is accepted here and only rejected when the solution is checked.
    pub fn create_arc(
        &mut self,
        origin: CityId,
        destination: CityId,
        tube: TubeId,
    ) -> GraphResult<ArcId> {
        self.city(origin)?;
        self.city(destination)?;
        self.tube(tube)?;
        let id = ArcId::for_slot(self.arcs.len())?;

        self.arcs.push(Some(Arc {
            id,
            origin,
            destination,
            tube,
            quantity: Volume::ZERO,
        }));
        self.city_mut(origin)?.outgoing.push(id);
        self.city_mut(destination)?.incoming.push(id);
        self.tube_mut(tube)?.arcs.push(id);

        debug!(arc = %id, %origin, %destination, %tube, "arc created");
        Ok(id)
    }

    /// Move an arc's tail to `new_origin`.
    pub fn reroute_origin(&mut self, arc: ArcId, new_origin: CityId) -> GraphResult<()> {
        self.city(new_origin)?;
        let old_origin = self.arc(arc)?.origin;

        remove_id(&mut self.city_mut(old_origin)?.outgoing, arc);
        self.city_mut(new_origin)?.outgoing.push(arc);
        self.arc_mut(arc)?.origin = new_origin;

        debug!(%arc, from = %old_origin, to = %new_origin, "arc origin moved");
        Ok(())
    }

    /// Move an arc's head to `new_destination`.
    pub fn reroute_destination(&mut self, arc: ArcId, new_destination: CityId) -> GraphResult<()> {
        self.city(new_destination)?;
        let old_destination = self.arc(arc)?.destination;

        remove_id(&mut self.city_mut(old_destination)?.incoming, arc);
        self.city_mut(new_destination)?.incoming.push(arc);
        self.arc_mut(arc)?.destination = new_destination;

        debug!(%arc, from = %old_destination, to = %new_destination, "arc destination moved");
        Ok(())
    }

    /// Unregister an arc everywhere and free its slot. Returns the removed arc.
    pub fn remove_arc(&mut self, arc: ArcId) -> GraphResult<Arc> {
        let (origin, destination, tube) = {
            let a = self.arc(arc)?;
            (a.origin, a.destination, a.tube)
        };

        remove_id(&mut self.city_mut(origin)?.outgoing, arc);
        remove_id(&mut self.city_mut(destination)?.incoming, arc);
        remove_id(&mut self.tube_mut(tube)?.arcs, arc);
        let removed = self.arcs[arc.index()].take();

        debug!(%arc, %origin, %destination, %tube, "arc removed");
        removed.ok_or(crate::GraphError::UnknownArc(arc))
    }

    /// Append an existing arc to its tube's list unless it is already there.
    pub(crate) fn attach_to_tube(&mut self, arc: ArcId) -> GraphResult<()> {
        let tube = self.arc(arc)?.tube;
        let arcs = &mut self.tube_mut(tube)?.arcs;
        if !arcs.contains(&arc) {
            arcs.push(arc);
        }
        Ok(())
    }

    /// Check that every arc is mirrored exactly once in each list that should hold it.
    pub fn check_mirror(&self) -> GraphResult<()> {
        validate::validate_mirror(self)
    }
}

fn remove_id(list: &mut Vec<ArcId>, id: ArcId) {
    if let Some(pos) = list.iter().position(|&a| a == id) {
        list.remove(pos);
    }
}
