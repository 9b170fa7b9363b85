//! Aliquot counting.
//!
//! A tube that leaves a city on `n > 1` arcs is split `n - 1` times there, once
//! per patient of the cohort that owns it.

use tn_core::{CityId, TubeId};
use tn_graph::{GraphResult, Instance};

/// Aliquot counts from one pass over the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliquotReport {
    /// Indexed by tube arena index.
    per_tube: Vec<u64>,
    /// Indexed by city arena index.
    per_city: Vec<u64>,
    splits: Vec<(CityId, TubeId, u64)>,
    total: u64,
}

impl AliquotReport {
    pub fn tube(&self, tube: TubeId) -> u64 {
        self.per_tube.get(tube.index()).copied().unwrap_or(0)
    }

    pub fn city(&self, city: CityId) -> u64 {
        self.per_city.get(city.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// City with the most aliquots; the first one in city order on ties.
    pub fn busiest_city(&self) -> Option<(CityId, u64)> {
        self.per_city
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .fold(None, |best: Option<(usize, u64)>, (i, &n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((i, n)),
            })
            .map(|(i, n)| (CityId::from_index(i as u32), n))
    }

    /// Every non-zero (city, tube, count) split, in city order.
    pub fn splits(&self) -> &[(CityId, TubeId, u64)] {
        &self.splits
    }
}

/// Count aliquots per tube, per city and in total.
pub fn compute_aliquots(instance: &Instance) -> GraphResult<AliquotReport> {
    let mut report = AliquotReport {
        per_tube: vec![0; instance.tubes().len()],
        per_city: vec![0; instance.cities().len()],
        splits: Vec::new(),
        total: 0,
    };

    for city in instance.cities() {
        let mut fan_out: Vec<(TubeId, u64)> = Vec::new();
        for &id in &city.outgoing {
            let tube = instance.arc(id)?.tube;
            match fan_out.iter_mut().find(|(t, _)| *t == tube) {
                Some((_, n)) => *n += 1,
                None => fan_out.push((tube, 1)),
            }
        }

        for (tube, arcs) in fan_out {
            if arcs < 2 {
                continue;
            }
            let count = (arcs - 1) * u64::from(instance.tube_cohort(tube)?.patients);
            report.per_tube[tube.index()] += count;
            report.per_city[city.id.index()] += count;
            report.splits.push((city.id, tube, count));
            report.total += count;
        }
    }

    Ok(report)
}

/// Number of arcs over all tubes; each arc is one freeze/thaw leg.
pub fn total_freezes(instance: &Instance) -> usize {
    instance.tubes().iter().map(|t| t.arcs.len()).sum()
}
