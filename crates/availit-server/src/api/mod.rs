mod hospitals;
mod location;

use std::collections::BTreeMap;
use std::sync::Arc;

use availit_core::AppConfig;
use availit_scraper::{Geocoder, HtmlFetcher, LiveSource, ScraperError};
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_origin, request_id, OriginGuard, RequestId};

/// Shared, read-only per-process state. Every request clones it.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: HtmlFetcher,
    pub geocoder: Geocoder,
    pub sources: Arc<BTreeMap<String, LiveSource>>,
}

impl AppState {
    /// Builds the outbound client, geocoder and one [`LiveSource`] per
    /// configured city.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the HTTP client cannot be built or a
    /// source's selectors do not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let fetcher = HtmlFetcher::new(
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )?;
        let geocoder = Geocoder::new(fetcher.client().clone(), config.geocoder_url.clone());
        let sources = config
            .sources
            .iter()
            .map(|(key, source)| Ok((key.clone(), LiveSource::from_config(key, source)?)))
            .collect::<Result<BTreeMap<_, _>, ScraperError>>()?;

        Ok(Self {
            fetcher,
            geocoder,
            sources: Arc::new(sources),
        })
    }
}

/// Client-facing failure. Serializes as exactly `{"error": "<message>"}`;
/// the underlying cause is logged by the handler, never returned.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    sources: Vec<String>,
    timestamp: DateTime<Utc>,
}

fn build_cors(allowed_origin: HeaderValue) -> CorsLayer {
    let request_id = HeaderName::from_static("x-request-id");
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, request_id.clone()])
        .expose_headers([request_id])
}

/// One raw and one canonical route per configured source, e.g.
/// `/api/delhi-hospitals` and `/api/delhi-hospitals/canonical`.
///
/// Registered as literal paths because axum cannot capture part of a segment.
fn source_router(sources: &BTreeMap<String, LiveSource>) -> Router<AppState> {
    sources.keys().fold(Router::new(), |router, key| {
        let raw_key = key.clone();
        let canonical_key = key.clone();
        router
            .route(
                &format!("/api/{key}-hospitals"),
                get(
                    move |State(state): State<AppState>,
                          Extension(req_id): Extension<RequestId>| {
                        hospitals::live_hospitals(state, req_id, raw_key.clone())
                    },
                ),
            )
            .route(
                &format!("/api/{key}-hospitals/canonical"),
                get(
                    move |State(state): State<AppState>,
                          Extension(req_id): Extension<RequestId>| {
                        hospitals::canonical_hospitals(state, req_id, canonical_key.clone())
                    },
                ),
            )
    })
}

pub fn build_app(state: AppState, allowed_origin: HeaderValue) -> Router {
    let guard = OriginGuard::new(allowed_origin.clone());

    Router::new()
        .merge(source_router(&state.sources))
        .route("/api/location", get(location::locate))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn_with_state(guard, enforce_origin))
                .layer(build_cors(allowed_origin)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        sources: state.sources.keys().cloned().collect(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
