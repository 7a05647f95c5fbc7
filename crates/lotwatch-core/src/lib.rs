//! Carpark view-state engine.
//!
//! Holds the carpark record set and the user's position, projects them
//! through search/filter/sort queries and keeps list, dropdown and marker
//! views consistent with the current selection. No I/O happens here.

pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod projector;
pub mod record;
pub mod selection;
pub mod session;
pub mod store;
pub mod views;

#[cfg(test)]
mod test_support;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_FEED_URL};
pub use error::{ConfigError, CoreError};
pub use geo::{
    classify_availability, distance_meters, format_distance, parse_coordinate, Availability,
    LatLng,
};
pub use location::{LocationOutcome, LocationTicket, LocationTracker};
pub use projector::{project, Query, SortKey, UnknownSortKey};
pub use record::{CarparkRecord, RawCarpark};
pub use selection::SelectionController;
pub use session::{FocusRequest, RenderTarget, Session};
pub use store::CarparkStore;
pub use views::{CarparkDetail, Dropdown, DropdownOption, ListItem, Marker, ViewFrame};
