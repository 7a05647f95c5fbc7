use serde::{Deserialize, Serialize};

use crate::geo::{parse_coordinate, LatLng};

/// One entry of the DataMall `CarParkAvailabilityv2` feed, as delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCarpark {
    #[serde(rename = "CarParkID")]
    pub carpark_id: String,
    #[serde(rename = "Area")]
    pub area: String,
    /// Development (building) name shown to the user.
    #[serde(rename = "Development")]
    pub development: String,
    /// `"<lat> <lng>"`; may be empty or garbage for some carparks.
    #[serde(rename = "Location", default)]
    pub location: String,
    #[serde(rename = "AvailableLots")]
    pub available_lots: u32,
    /// `C` (cars), `Y` (motorcycles) or `H` (heavy vehicles).
    #[serde(rename = "LotType")]
    pub lot_type: String,
    #[serde(rename = "Agency")]
    pub agency: String,
}

/// A normalized carpark, owned by [`crate::CarparkStore`].
///
/// Everything except `distance` is fixed for the lifetime of a record set;
/// `distance` is derived from the user's position and only the store
/// rewrites it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarparkRecord {
    pub id: String,
    pub name: String,
    pub area: String,
    pub available_lots: u32,
    pub lot_type: String,
    pub agency: String,
    pub position: Option<LatLng>,
    /// Meters from the user; `None` until a user position is known or when
    /// the carpark itself has no position.
    pub distance: Option<f64>,
}

impl From<RawCarpark> for CarparkRecord {
    fn from(raw: RawCarpark) -> Self {
        Self {
            position: parse_coordinate(&raw.location),
            id: raw.carpark_id,
            name: raw.development,
            area: raw.area,
            available_lots: raw.available_lots,
            lot_type: raw.lot_type,
            agency: raw.agency,
            distance: None,
        }
    }
}

impl CarparkRecord {
    /// The text searched by free-text queries: name and area, lowercased.
    #[must_use]
    pub fn haystack(&self) -> String {
        format!("{} {}", self.name, self.area).to_lowercase()
    }
}
