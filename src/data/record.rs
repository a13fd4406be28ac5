//! Known shapes of incoming point records.
//!
//! Event feeds disagree on where they put coordinates. Rather than probing field names at
//! runtime, each accepted layout is a variant of [`PointRecord`]; serde tries them in
//! declaration order (nested `details`, flat fields, nested `coordinates`).

use serde::{Deserialize, Serialize};

use crate::foundation::error::HeatmapResult;

/// Coordinate pair as found under a `details` object (`details.xCoord`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailCoords {
    #[serde(rename = "xCoord", alias = "x_coord", alias = "x")]
    pub x: f64,
    #[serde(rename = "yCoord", alias = "y_coord", alias = "y")]
    pub y: f64,
}

/// Coordinate pair as found under a `coordinates` object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlainCoords {
    pub x: f64,
    pub y: f64,
}

/// A single observation in one of the accepted layouts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointRecord {
    Details {
        details: DetailCoords,
        #[serde(
            default,
            deserialize_with = "lenient_weight",
            skip_serializing_if = "Option::is_none"
        )]
        weight: Option<f64>,
    },
    Flat {
        #[serde(rename = "xCoord", alias = "x_coord", alias = "x")]
        x: f64,
        #[serde(rename = "yCoord", alias = "y_coord", alias = "y")]
        y: f64,
        #[serde(
            default,
            deserialize_with = "lenient_weight",
            skip_serializing_if = "Option::is_none"
        )]
        weight: Option<f64>,
    },
    Coordinates {
        coordinates: PlainCoords,
        #[serde(
            default,
            deserialize_with = "lenient_weight",
            skip_serializing_if = "Option::is_none"
        )]
        weight: Option<f64>,
    },
}

impl PointRecord {
    pub fn xy(&self) -> (f64, f64) {
        match *self {
            Self::Details { details, .. } => (details.x, details.y),
            Self::Flat { x, y, .. } => (x, y),
            Self::Coordinates { coordinates, .. } => (coordinates.x, coordinates.y),
        }
    }

    pub fn weight(&self) -> Option<f64> {
        match *self {
            Self::Details { weight, .. }
            | Self::Flat { weight, .. }
            | Self::Coordinates { weight, .. } => weight,
        }
    }
}

/// A `weight` that is not a number reads as absent instead of rejecting the record.
fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(serde_json::Value::deserialize(deserializer)?.as_f64())
}

/// A record slot that either matched a known layout or did not.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordSlot {
    Known(PointRecord),
    Unknown(serde::de::IgnoredAny),
}

/// Parse a JSON array of records, keeping unrecognized entries as gaps.
///
/// Only a malformed document (not an array, invalid JSON) is an error; individual records in
/// an unknown layout come back as `None` so indices still line up with the source array.
pub fn parse_records(json: &str) -> HeatmapResult<Vec<Option<PointRecord>>> {
    let slots: Vec<RecordSlot> = serde_json::from_str(json)?;
    Ok(slots
        .into_iter()
        .map(|slot| match slot {
            RecordSlot::Known(r) => Some(r),
            RecordSlot::Unknown(_) => None,
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/data/record.rs"]
mod tests;
