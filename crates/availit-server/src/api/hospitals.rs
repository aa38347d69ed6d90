use availit_core::{CanonicalHospitalAvailability, RawHospitalRecord};
use availit_scraper::normalize_record;
use axum::{http::StatusCode, Json};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn live_hospitals(
    state: AppState,
    req_id: RequestId,
    key: String,
) -> Result<Json<Vec<RawHospitalRecord>>, ApiError> {
    let records = scrape(&state, &req_id, &key).await?;
    Ok(Json(records))
}

/// Same scrape, passed through the field normalizer before serializing.
pub(super) async fn canonical_hospitals(
    state: AppState,
    req_id: RequestId,
    key: String,
) -> Result<Json<Vec<CanonicalHospitalAvailability>>, ApiError> {
    let records = scrape(&state, &req_id, &key).await?;
    Ok(Json(records.iter().map(normalize_record).collect()))
}

async fn scrape(
    state: &AppState,
    req_id: &RequestId,
    key: &str,
) -> Result<Vec<RawHospitalRecord>, ApiError> {
    let Some(source) = state.sources.get(key) else {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "unknown source"));
    };

    source.scrape(&state.fetcher).await.map_err(|e| {
        tracing::error!(
            request_id = %req_id.0,
            source = %key,
            url = %source.url(),
            timeout = e.is_timeout(),
            error = %e,
            "live source scrape failed"
        );
        ApiError::internal(source.error_message())
    })
}
