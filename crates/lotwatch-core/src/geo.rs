//! Pure geographic helpers: coordinate parsing, great-circle distance and
//! the small formatting rules shared by every view.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Placeholder shown wherever a distance or coordinate is unknown.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Availability band used to colour lot counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Good,
    Mid,
    Low,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Good => write!(f, "good"),
            Availability::Mid => write!(f, "mid"),
            Availability::Low => write!(f, "low"),
        }
    }
}

/// Parse a feed location string of the form `"<lat> <lng>"`.
///
/// Returns `None` for empty input, anything other than exactly two
/// whitespace-separated tokens, or tokens that are not finite floats.
#[must_use]
pub fn parse_coordinate(raw: &str) -> Option<LatLng> {
    let mut parts = raw.split_whitespace();
    let lat = parts.next()?.parse::<f64>().ok()?;
    let lng = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() || !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    Some(LatLng { lat, lng })
}

/// Great-circle distance between two points in meters.
#[must_use]
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Band a lot count: more than 500 is good, 200..=500 is mid, else low.
#[must_use]
pub fn classify_availability(lots: u32) -> Availability {
    if lots > 500 {
        Availability::Good
    } else if lots >= 200 {
        Availability::Mid
    } else {
        Availability::Low
    }
}

/// Human-readable distance: whole meters below 1 km, kilometers to 2dp above.
#[must_use]
pub fn format_distance(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m.is_finite() && m < 1000.0 => format!("{} m", m.round()),
        Some(m) if m.is_finite() => format!("{:.2} km", m / 1000.0),
        _ => PLACEHOLDER.to_string(),
    }
}

#[must_use]
pub fn format_coordinates(position: Option<LatLng>) -> String {
    position.map_or_else(
        || PLACEHOLDER.to_string(),
        |p| format!("{:.5}, {:.5}", p.lat, p.lng),
    )
}

/// Google Maps search link for a carpark, labelled with its name.
#[must_use]
pub fn maps_link(name: &str, position: Option<LatLng>) -> String {
    let query = position.map_or_else(String::new, |p| format!("{},{}", p.lat, p.lng));
    format!(
        "https://www.google.com/maps?q={} ({})",
        utf8_percent_encode(&query, NON_ALPHANUMERIC),
        utf8_percent_encode(name, NON_ALPHANUMERIC)
    )
}
