//! City map in GeoJSON.
//!
//! Only the parts of a `FeatureCollection` that name and place cities are read:
//!
//! ```json
//! { "type": "FeatureCollection",
//!   "features": [
//!     { "type": "Feature", "id": 0,
//!       "properties": { "name": "Lyon" },
//!       "geometry": { "type": "Point", "coordinates": [45.76, 4.83] } } ] }
//! ```
//!
//! Coordinates are given as `[lat, lon]`.

use serde::Deserialize;
use tn_graph::GeoPoint;

use crate::{FormatError, FormatResult};

/// A city as listed by the map, before it joins an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub number: u32,
    pub name: String,
    pub position: Option<GeoPoint>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    id: u32,
    properties: Properties,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Properties {
    name: String,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

/// Cities in map order.
pub fn parse_map(json: &str) -> FormatResult<Vec<CityRecord>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    collection
        .features
        .into_iter()
        .map(|feature| {
            let position = match feature.geometry {
                Some(Geometry { coordinates }) => match coordinates[..] {
                    [lat, lon, ..] => Some(GeoPoint { lat, lon }),
                    _ => {
                        return Err(FormatError::Map(format!(
                            "city {} has fewer than two coordinates",
                            feature.id
                        )));
                    }
                },
                None => None,
            };
            Ok(CityRecord {
                number: feature.id,
                name: feature.properties.name,
                position,
            })
        })
        .collect()
}
