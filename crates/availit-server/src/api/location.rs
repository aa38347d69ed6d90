use availit_core::LocationResult;
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const LOCATION_ERROR_MESSAGE: &str = "Failed to fetch location data";

#[derive(Debug, Deserialize)]
pub(super) struct LocationQuery {
    city: Option<String>,
}

pub(super) async fn locate(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Vec<LocationResult>>, ApiError> {
    let city = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .ok_or_else(|| ApiError::bad_request("city query parameter is required"))?;

    let matches = state.geocoder.geocode(city).await.map_err(|e| {
        tracing::error!(
            request_id = %req_id.0,
            city,
            timeout = e.is_timeout(),
            error = %e,
            "geocoding failed"
        );
        ApiError::internal(LOCATION_ERROR_MESSAGE)
    })?;

    Ok(Json(matches))
}
