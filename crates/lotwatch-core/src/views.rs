//! Render-ready projections consumed by the list panel, the dropdown, the
//! map markers and the details pane.

use serde::Serialize;

use crate::geo::{
    classify_availability, format_coordinates, format_distance, maps_link, Availability, LatLng,
};
use crate::projector::{project, Query};
use crate::record::CarparkRecord;
use crate::selection::SelectionController;
use crate::store::CarparkStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    pub area: String,
    pub available_lots: u32,
    pub availability: Availability,
    pub lot_type: String,
    pub agency: String,
    pub distance: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub options: Vec<DropdownOption>,
    /// The active id, only when it is one of `options`.
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub area: String,
    pub position: LatLng,
    pub available_lots: u32,
    pub availability: Availability,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarparkDetail {
    pub id: String,
    pub name: String,
    pub area: String,
    pub available_lots: u32,
    pub lot_type: String,
    pub agency: String,
    pub distance: String,
    pub coordinates: String,
    pub maps_link: String,
}

impl From<&CarparkRecord> for CarparkDetail {
    fn from(record: &CarparkRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            area: record.area.clone(),
            available_lots: record.available_lots,
            lot_type: record.lot_type.clone(),
            agency: record.agency.clone(),
            distance: format_distance(record.distance),
            coordinates: format_coordinates(record.position),
            maps_link: maps_link(&record.name, record.position),
        }
    }
}

/// Everything a render target needs for one consistent paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    pub query: Query,
    pub user_position: Option<LatLng>,
    pub list: Vec<ListItem>,
    pub dropdown: Dropdown,
    pub markers: Vec<Marker>,
    pub count_label: String,
    pub detail: Option<CarparkDetail>,
}

impl ViewFrame {
    /// Project the store and lay the result out for every view.
    #[must_use]
    pub fn build(store: &CarparkStore, query: &Query, selection: &SelectionController) -> Self {
        let items = project(store, query);

        let list = items
            .iter()
            .map(|r| ListItem {
                id: r.id.clone(),
                name: r.name.clone(),
                area: r.area.clone(),
                available_lots: r.available_lots,
                availability: classify_availability(r.available_lots),
                lot_type: r.lot_type.clone(),
                agency: r.agency.clone(),
                distance: format_distance(r.distance),
                active: selection.is_active(&r.id),
            })
            .collect();

        let options: Vec<DropdownOption> = items
            .iter()
            .map(|r| DropdownOption {
                id: r.id.clone(),
                name: r.name.clone(),
            })
            .collect();
        let selected = selection
            .active_id()
            .filter(|id| options.iter().any(|o| o.id == *id))
            .map(str::to_string);

        let markers = items
            .iter()
            .filter_map(|r| {
                r.position.map(|position| Marker {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    area: r.area.clone(),
                    position,
                    available_lots: r.available_lots,
                    availability: classify_availability(r.available_lots),
                    active: selection.is_active(&r.id),
                })
            })
            .collect();

        let detail = selection
            .active_id()
            .and_then(|id| store.find_by_id(id))
            .map(CarparkDetail::from);

        Self {
            query: query.clone(),
            user_position: store.user_position(),
            count_label: format!("{} carparks", items.len()),
            list,
            dropdown: Dropdown { options, selected },
            markers,
            detail,
        }
    }
}
