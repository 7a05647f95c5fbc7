use axum::{
    extract::{Query as QueryParams, State},
    Extension, Json,
};
use lotwatch_core::{CoreError, LatLng, Query, Session, SortKey, ViewFrame};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct CarparkViewParams {
    pub search: Option<String>,
    pub lot_type: Option<String>,
    pub sort: Option<String>,
    /// Raw text; parsed in `build_position`.
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub selected: Option<String>,
}

/// `GET /api/v1/carparks`: fetch the live feed and return the projected
/// list, dropdown and marker views for the given query.
pub(super) async fn carpark_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    QueryParams(params): QueryParams<CarparkViewParams>,
) -> Result<Json<ApiResponse<ViewFrame>>, ApiError> {
    let query = build_query(&params)
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;
    let position = build_position(params.lat.as_deref(), params.lng.as_deref())
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;

    let feed = state.datamall.fetch_all().await.map_err(|e| {
        tracing::error!(error = %e, "failed to fetch DataMall feed");
        ApiError::new(req_id.0.clone(), "upstream_error", "failed to fetch carpark feed")
    })?;

    let mut session = Session::new();
    session.load(&feed).map_err(|e| {
        tracing::error!(error = %e, "DataMall feed rejected");
        ApiError::new(req_id.0.clone(), "upstream_error", e.to_string())
    })?;
    if let Some(position) = position {
        session.set_user_position(position);
    }
    session.set_query(query);

    if let Some(id) = params.selected.as_deref().filter(|s| !s.is_empty()) {
        session.select(id, false).map_err(|e| match e {
            CoreError::UnknownCarpark(_) => {
                ApiError::new(req_id.0.clone(), "not_found", e.to_string())
            }
            other => ApiError::new(req_id.0.clone(), "internal_error", other.to_string()),
        })?;
    }

    tracing::debug!(
        request_id = %req_id.0,
        carparks = session.store().len(),
        "projected carpark view"
    );

    Ok(Json(ApiResponse {
        data: session.frame(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn build_query(params: &CarparkViewParams) -> Result<Query, String> {
    let sort_key = match params.sort.as_deref() {
        None | Some("") => SortKey::default(),
        Some(raw) => raw.parse::<SortKey>().map_err(|e| e.to_string())?,
    };
    Ok(Query {
        search_text: params.search.clone().unwrap_or_default(),
        lot_type_filter: params.lot_type.clone().filter(|t| !t.is_empty()),
        sort_key,
    })
}

fn build_position(lat: Option<&str>, lng: Option<&str>) -> Result<Option<LatLng>, String> {
    fn present(raw: Option<&str>) -> Option<&str> {
        raw.map(str::trim).filter(|v| !v.is_empty())
    }
    match (present(lat), present(lng)) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat = parse_degrees("lat", lat)?;
            let lng = parse_degrees("lng", lng)?;
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                return Err(format!("position out of range: {lat}, {lng}"));
            }
            Ok(Some(LatLng::new(lat, lng)))
        }
        _ => Err("lat and lng must be given together".to_string()),
    }
}

fn parse_degrees(name: &str, raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{name} is not a number: '{raw}'"))
}
