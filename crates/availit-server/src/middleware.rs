use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The one browser origin permitted to call the API.
///
/// `CorsLayer` only decides which response headers a browser sees; the guard
/// is what keeps a foreign-origin request from reaching a handler at all.
#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: HeaderValue,
}

impl OriginGuard {
    #[must_use]
    pub fn new(allowed: HeaderValue) -> Self {
        Self { allowed }
    }

    /// Exact byte match, the same rule `CorsLayer` applies, so a request
    /// that passes the guard always gets its `Access-Control-Allow-Origin`.
    fn allows(&self, origin: &HeaderValue) -> bool {
        *origin == self.allowed
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware rejecting requests whose `Origin` is not the allowed origin.
///
/// Requests without an `Origin` header (curl, same-origin navigations) pass.
pub async fn enforce_origin(
    State(guard): State<OriginGuard>,
    req: Request,
    next: Next,
) -> Response {
    match req.headers().get(ORIGIN) {
        Some(origin) if !guard.allows(origin) => {
            tracing::warn!(
                origin = ?origin,
                path = %req.uri().path(),
                "rejected request from disallowed origin"
            );
            (
                StatusCode::FORBIDDEN,
                Json(MiddlewareErrorBody {
                    error: "origin not allowed",
                }),
            )
                .into_response()
        }
        _ => next.run(req).await,
    }
}
