//! End-to-end checks of the engine through its public API: load a feed,
//! locate the user, query and select, the way a front-end drives it.

use lotwatch_core::{
    project, CarparkStore, CoreError, LatLng, LocationOutcome, Query, SelectionController,
    Session, SortKey,
};
use serde_json::json;

fn sample_feed() -> serde_json::Value {
    json!({
        "odata.metadata": "http://datamall2.mytransport.sg/ltaodataservice/$metadata#CarParkAvailabilityv2",
        "value": [
            { "CarParkID": "1", "Area": "Marina", "Development": "Suntec City", "Location": "1.29375 103.85718", "AvailableLots": 1104, "LotType": "C", "Agency": "LTA" },
            { "CarParkID": "2", "Area": "Marina", "Development": "Marina Square", "Location": "1.29115 103.85728", "AvailableLots": 1091, "LotType": "C", "Agency": "LTA" },
            { "CarParkID": "3", "Area": "Marina", "Development": "Raffles City", "Location": "1.29382 103.85319", "AvailableLots": 453, "LotType": "C", "Agency": "LTA" },
            { "CarParkID": "4", "Area": "Marina", "Development": "The Esplanade", "Location": "1.29011 103.85561", "AvailableLots": 448, "LotType": "C", "Agency": "LTA" },
            { "CarParkID": "5", "Area": "Marina", "Development": "Millenia Singapore", "Location": "1.29251 103.86009", "AvailableLots": 532, "LotType": "C", "Agency": "LTA" },
            { "CarParkID": "6", "Area": "", "Development": "BLK 1 TAMPINES", "Location": "", "AvailableLots": 87, "LotType": "Y", "Agency": "HDB" }
        ]
    })
}

#[test]
fn nearest_first_after_locating() {
    let mut store = CarparkStore::new();
    store.load(&sample_feed()).expect("feed loads");
    store.set_user_position(LatLng::new(1.290_27, 103.851_959));

    let query = Query {
        sort_key: SortKey::DistanceAsc,
        ..Query::default()
    };
    let ids: Vec<&str> = project(&store, &query)
        .iter()
        .map(|r| r.id.as_str())
        .collect();

    // The Esplanade and Raffles City are the two closest; the unmapped HDB
    // carpark has no distance and goes last.
    assert_eq!(ids.len(), 6);
    assert_eq!(ids.last(), Some(&"6"));
    assert!(ids[..2].contains(&"3") && ids[..2].contains(&"4"), "{ids:?}");
    assert_eq!(store.find_by_id("6").and_then(|r| r.distance), None);
}

#[test]
fn filter_and_search_compose() {
    let mut store = CarparkStore::new();
    store.load(&sample_feed()).expect("feed loads");

    let query = Query {
        search_text: "tampines".to_string(),
        lot_type_filter: Some("Y".to_string()),
        sort_key: SortKey::LotsDesc,
    };
    let names: Vec<&str> = project(&store, &query)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["BLK 1 TAMPINES"]);

    let mismatched = Query {
        lot_type_filter: Some("C".to_string()),
        ..query
    };
    assert!(project(&store, &mismatched).is_empty());
}

#[test]
fn selection_survives_only_while_its_record_exists() {
    let mut store = CarparkStore::new();
    store.load(&sample_feed()).expect("feed loads");
    let mut selection = SelectionController::new();
    selection.select(&store, "6").expect("known id");

    let err = selection.select(&store, "nonexistent-id").unwrap_err();
    assert!(matches!(err, CoreError::UnknownCarpark(_)));
    assert!(selection.is_active("6"));

    let mut trimmed = sample_feed();
    trimmed["value"].as_array_mut().expect("array").pop();
    store.load(&trimmed).expect("feed loads");
    assert!(selection.is_dangling(&store));
}

#[test]
fn session_drives_a_full_interaction() {
    let mut session = Session::new();
    session.load(&sample_feed()).expect("feed loads");
    assert_eq!(session.frame().count_label, "6 carparks");

    let ticket = session.begin_location();
    assert_eq!(
        session.complete_location(ticket, Ok(LatLng::new(1.290_27, 103.851_959))),
        LocationOutcome::Applied(LatLng::new(1.290_27, 103.851_959))
    );

    session.set_sort_key(SortKey::DistanceAsc);
    let focus = session.select("4", true).expect("known id");
    assert!(focus.detail.distance.ends_with(" m"));

    let frame = session.frame();
    assert_eq!(frame.markers.len(), 5);
    assert_eq!(frame.list.last().map(|i| i.distance.as_str()), Some("—"));
    assert_eq!(frame.dropdown.selected.as_deref(), Some("4"));

    session.reset();
    assert_eq!(session.frame().dropdown.selected, None);
    assert_eq!(session.query().sort_key, SortKey::LotsDesc);
}
