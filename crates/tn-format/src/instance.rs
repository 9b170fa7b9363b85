//! Instance file parser.
//!
//! Layout (one record per line, fields separated by tabs):
//!
//! ```text
//! C                         city count
//! K                         cohort count
//! c_1 .. c_K                city number of each cohort
//! p_1 .. p_K                patient count of each cohort
//! T                         type count
//! U                         tube count per type
//! v_1 .. v_U                tube volumes, one line per (cohort, type)
//! d_1 .. d_T                demands, one line per city
//! F                         max freeze count
//! ```

use tn_core::{CityId, Volume};
use tn_graph::{Instance, InstanceBuilder};

use crate::map::CityRecord;
use crate::text::Lines;
use crate::types::default_type_names;
use crate::{FormatError, FormatResult};

/// Build an instance (with no arcs) from the instance file text.
///
/// `cities` are taken in map order, the first `C` of them joining the
/// instance; without a map, cities `City 0 .. City C-1` are numbered `0..C`.
/// Likewise the first `T` of `type_names` are used, or `T1..TT` by default.
///
/// Cohort cities are given by city number, not by position in the map. The
/// two agree when the map numbers its cities `0..C` in order. Demand lines
/// follow map order.
pub fn parse_instance(
    text: &str,
    cities: Option<&[CityRecord]>,
    type_names: Option<&[String]>,
) -> FormatResult<Instance> {
    let mut lines = Lines::new(text);
    let mut builder = InstanceBuilder::new();

    let city_count: usize = lines.next_value("city count")?;
    let city_ids = add_cities(&mut builder, city_count, cities)?;

    let cohort_count: usize = lines.next_value("cohort count")?;
    let (city_line, cohort_cities) = lines.next_values::<u32>(cohort_count, "cohort cities")?;
    let (_, patients) = lines.next_values::<u32>(cohort_count, "patient counts")?;

    let type_count: usize = lines.next_value("type count")?;
    let tube_count: usize = lines.next_value("tube count")?;
    let names = match type_names {
        Some(names) if names.len() < type_count => {
            return Err(FormatError::NotEnoughTypes {
                needed: type_count,
                available: names.len(),
            });
        }
        Some(names) => names[..type_count].to_vec(),
        None => default_type_names(type_count),
    };
    builder.set_type_names(names.iter().cloned());

    for (&number, &patient_count) in cohort_cities.iter().zip(&patients) {
        let city = find(&city_ids, number).ok_or(FormatError::UnknownCity {
            line: city_line,
            number,
        })?;
        let cohort = builder.add_cohort(city, patient_count)?;
        for name in &names {
            let sample_type = builder.add_type(cohort, name.clone())?;
            let (_, volumes) = lines.next_values::<Volume>(tube_count, "tube volumes")?;
            for volume in volumes {
                builder.add_tube(sample_type, volume)?;
            }
        }
    }

    for &(_, city) in &city_ids {
        let (_, demands) = lines.next_values::<Volume>(type_count, "demands")?;
        for (name, demand) in names.iter().zip(demands) {
            builder.set_demand(city, name.clone(), demand)?;
        }
    }

    builder.set_max_freezes(lines.next_value("max freezes")?);
    Ok(builder.build()?)
}

fn add_cities(
    builder: &mut InstanceBuilder,
    count: usize,
    cities: Option<&[CityRecord]>,
) -> FormatResult<Vec<(u32, CityId)>> {
    match cities {
        Some(records) if records.len() < count => Err(FormatError::NotEnoughCities {
            needed: count,
            available: records.len(),
        }),
        Some(records) => Ok(records[..count]
            .iter()
            .map(|r| (r.number, builder.add_city(r.number, r.name.clone(), r.position)))
            .collect()),
        None => Ok((0..count as u32)
            .map(|n| (n, builder.add_city(n, format!("City {n}"), None)))
            .collect()),
    }
}

fn find(cities: &[(u32, CityId)], number: u32) -> Option<CityId> {
    cities.iter().find(|(n, _)| *n == number).map(|&(_, id)| id)
}
