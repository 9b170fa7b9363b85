//! Solution statistics for reporting.

use serde::Serialize;
use tn_core::Volume;
use tn_flow::{compute_aliquots, required_volume, total_freezes};
use tn_graph::Instance;

use crate::error::AppResult;

/// One row per tube, in (cohort, type, tube) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TubeSummary {
    pub cohort: String,
    pub type_name: String,
    pub number: u32,
    pub capacity: Volume,
    pub required: Volume,
    pub used_by_cohort: bool,
    pub arcs: usize,
    pub aliquots: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusiestCity {
    pub city: String,
    pub aliquots: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionSummary {
    pub tubes: Vec<TubeSummary>,
    pub total_aliquots: u64,
    pub total_freezes: usize,
    pub busiest_city: Option<BusiestCity>,
}

impl SolutionSummary {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compute the summary from the graph as it stands.
pub fn summarize(instance: &Instance) -> AppResult<SolutionSummary> {
    let report = compute_aliquots(instance)?;

    let mut tubes = Vec::new();
    for tube in instance.tubes_in_file_order() {
        let sample_type = instance.tube_type(tube.id)?;
        let cohort_city = instance.tube_origin(tube.id)?;
        tubes.push(TubeSummary {
            cohort: instance.city(cohort_city)?.display_name(),
            type_name: sample_type.name.clone(),
            number: tube.number,
            capacity: tube.volume,
            required: required_volume(instance, cohort_city, tube.id)?,
            used_by_cohort: tube.used_by_cohort,
            arcs: tube.arcs.len(),
            aliquots: report.tube(tube.id),
        });
    }

    let busiest_city = match report.busiest_city() {
        Some((city, aliquots)) => Some(BusiestCity {
            city: instance.city(city)?.display_name(),
            aliquots,
        }),
        None => None,
    };

    Ok(SolutionSummary {
        tubes,
        total_aliquots: report.total(),
        total_freezes: total_freezes(instance),
        busiest_city,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_graph::InstanceBuilder;

    #[test]
    fn summary_of_a_fan_out() {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER"]);
        let hub = b.add_city(0, "Hub", None);
        let x = b.add_city(1, "X", None);
        let y = b.add_city(2, "Y", None);
        let cohort = b.add_cohort(hub, 3).unwrap();
        let ser = b.add_type(cohort, "SER").unwrap();
        let tube = b.add_tube(ser, Volume::units(10)).unwrap();
        b.set_demand(x, "SER", Volume::from_milli(1500)).unwrap();
        b.set_demand(y, "SER", Volume::units(2)).unwrap();
        let mut instance = b.build().unwrap();
        instance.create_arc(hub, x, tube).unwrap();
        instance.create_arc(hub, y, tube).unwrap();

        let summary = summarize(&instance).unwrap();
        assert_eq!(summary.tubes.len(), 1);
        assert_eq!(summary.tubes[0].required, Volume::from_milli(3500));
        assert_eq!(summary.tubes[0].aliquots, 3);
        assert_eq!(summary.total_freezes, 2);
        assert_eq!(
            summary.busiest_city,
            Some(BusiestCity {
                city: "Hub [0]".into(),
                aliquots: 3
            })
        );

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["tubes"][0]["required"], "3.5");
        assert_eq!(json["total_aliquots"], 3);
    }
}
