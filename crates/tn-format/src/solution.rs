//! Solution file: parse and export.
//!
//! Tubes appear in (cohort, type, tube) order in both blocks.
//!
//! ```text
//! i  j  k  n  c_1 .. c_n     block 1: cities visited by tube k of type j of cohort i
//! m                          block 2: arc count of the tube,
//! o  d                       then one origin/destination line per arc
//! ```
//!
//! Indices `i j k` are 0-based; cities are written by number.

use std::fmt::Write;

use tn_core::{CityId, TubeId};
use tn_graph::Instance;
use tracing::debug;

use crate::text::{Lines, parse_field};
use crate::{FormatError, FormatResult};

/// Rebuild tube visits and arcs from solution text.
///
/// A tube whose visit list contains its cohort city is marked as drawn by the
/// cohort. Arcs are created in file order. The whole text is read before the
/// instance is touched, so a parse error leaves it unchanged.
pub fn parse_solution(text: &str, instance: &mut Instance) -> FormatResult<()> {
    let tubes: Vec<TubeId> = instance.tubes_in_file_order().map(|t| t.id).collect();
    let mut lines = Lines::new(text);

    let mut visits = Vec::with_capacity(tubes.len());
    for _ in &tubes {
        let (line, fields) = lines.next_record("visited cities")?;
        let cities = fields
            .iter()
            .skip(4)
            .map(|f| city(instance, f, line))
            .collect::<FormatResult<Vec<CityId>>>()?;
        visits.push(cities);
    }

    let mut arcs: Vec<(CityId, CityId, TubeId)> = Vec::new();
    for &tube in &tubes {
        let count: usize = lines.next_value("arc count")?;
        for _ in 0..count {
            let (line, fields) = lines.next_record("arc")?;
            let [origin, destination] = fields[..] else {
                return Err(FormatError::Line {
                    line,
                    reason: format!("expected origin and destination, found {} fields", fields.len()),
                });
            };
            arcs.push((
                city(instance, origin, line)?,
                city(instance, destination, line)?,
                tube,
            ));
        }
    }

    if !lines.at_end() {
        debug!("ignoring trailing lines after the last tube");
    }

    for (&tube, cities) in tubes.iter().zip(visits) {
        let drawn = cities.contains(&instance.tube_origin(tube)?);
        instance.set_tube_visits(tube, cities)?;
        instance.set_used_by_cohort(tube, drawn)?;
    }
    for (origin, destination, tube) in arcs {
        instance.create_arc(origin, destination, tube)?;
    }
    Ok(())
}

/// Serialize visits and arcs in the layout [`parse_solution`] reads.
pub fn write_solution(instance: &Instance) -> FormatResult<String> {
    let mut out = String::new();

    for (i, cohort) in instance.cohorts().iter().enumerate() {
        for (j, &ty) in cohort.types.iter().enumerate() {
            for (k, &tube) in instance.sample_type(ty)?.tubes.iter().enumerate() {
                let visits = &instance.tube(tube)?.visits;
                write!(out, "{i}\t{j}\t{k}\t{}", visits.len())?;
                for &city in visits {
                    write!(out, "\t{}", instance.city(city)?.number)?;
                }
                out.push('\n');
            }
        }
    }

    for tube in instance.tubes_in_file_order() {
        writeln!(out, "{}", tube.arcs.len())?;
        for &id in &tube.arcs {
            let arc = instance.arc(id)?;
            let origin = instance.city(arc.origin)?.number;
            let destination = instance.city(arc.destination)?.number;
            writeln!(out, "{origin}\t{destination}")?;
        }
    }

    Ok(out)
}

fn city(instance: &Instance, field: &str, line: usize) -> FormatResult<CityId> {
    let number: u32 = parse_field(field, line, "city number")?;
    instance
        .find_city_by_number(number)
        .ok_or(FormatError::UnknownCity { line, number })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_core::Volume;
    use tn_graph::InstanceBuilder;

    /// Cohort at city 0 with one type of two tubes; cities 0..3.
    fn empty() -> Instance {
        let mut b = InstanceBuilder::new();
        b.set_type_names(["SER"]);
        let cities: Vec<CityId> = (0..3).map(|n| b.add_city(n, format!("City {n}"), None)).collect();
        let cohort = b.add_cohort(cities[0], 4).unwrap();
        let ser = b.add_type(cohort, "SER").unwrap();
        b.add_tube(ser, Volume::units(10)).unwrap();
        b.add_tube(ser, Volume::units(10)).unwrap();
        b.build().unwrap()
    }

    const TEXT: &str = "0\t0\t0\t3\t0\t1\t2\n0\t0\t1\t0\n2\n0\t1\n1\t2\n0\n";

    #[test]
    fn parse_sets_visits_flags_and_arcs() {
        let mut instance = empty();
        parse_solution(TEXT, &mut instance).unwrap();

        let tubes = instance.tubes();
        assert!(tubes[0].used_by_cohort);
        assert!(!tubes[1].used_by_cohort);
        assert_eq!(tubes[0].visits.len(), 3);
        assert_eq!(tubes[0].arcs.len(), 2);
        assert!(tubes[1].arcs.is_empty());
        assert!(instance.check_mirror().is_ok());
    }

    #[test]
    fn export_reproduces_text() {
        let mut instance = empty();
        parse_solution(TEXT, &mut instance).unwrap();
        assert_eq!(write_solution(&instance).unwrap(), TEXT);
    }

    #[test]
    fn crlf_is_accepted() {
        let mut instance = empty();
        parse_solution(&TEXT.replace('\n', "\r\n"), &mut instance).unwrap();
        assert_eq!(instance.arc_count(), 2);
    }

    #[test]
    fn unknown_city_in_arc() {
        let mut instance = empty();
        let text = TEXT.replace("\n1\t2\n", "\n1\t7\n");
        assert!(matches!(
            parse_solution(&text, &mut instance),
            Err(FormatError::UnknownCity { line: 5, number: 7 })
        ));
    }

    #[test]
    fn failed_parse_leaves_instance_untouched() {
        let mut instance = empty();
        let text = TEXT.replace("\n1\t2\n", "\n1\t7\n");
        assert!(parse_solution(&text, &mut instance).is_err());

        assert_eq!(instance.arc_count(), 0);
        assert!(instance.tubes().iter().all(|t| t.visits.is_empty() && !t.used_by_cohort));
    }

    #[test]
    fn arc_line_needs_two_fields() {
        let mut instance = empty();
        let text = TEXT.replace("0\t1\n1\t2", "0\t1\n1");
        assert!(matches!(
            parse_solution(&text, &mut instance),
            Err(FormatError::Line { line: 5, .. })
        ));
    }
}
