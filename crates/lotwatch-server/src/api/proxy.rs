//! `GET /api/carparks`: pass-through to the DataMall feed.
//!
//! The body shape is what the browser front-end expects: the upstream JSON
//! verbatim on success, `{"error": "..."}` otherwise.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use lotwatch_datamall::DatamallError;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct ProxyError {
    pub error: &'static str,
}

pub(super) async fn proxy_carparks(State(state): State<AppState>) -> impl IntoResponse {
    match state.datamall.fetch_raw().await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(DatamallError::UpstreamStatus { status, url }) => {
            tracing::warn!(status, url = %url, "DataMall rejected proxied request");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                Json(ProxyError {
                    error: "Failed to fetch from LTA API",
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "DataMall proxy failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProxyError {
                    error: "Server error",
                }),
            )
                .into_response()
        }
    }
}
