//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{DomainError, Point, Threshold};
use crate::geocode::GeocodeError;
use crate::nearby::{DistanceMetric, nearest_with, within};
use crate::search::{search, search_near};

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(all_stations))
        .route("/api/paths", get(all_paths))
        .route("/api/stations/nearest", get(nearest_stations))
        .route("/api/stations/search", get(search_stations))
        .route("/api/locate", get(locate))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The map page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate::new(&state.view, state.registry.len().await);
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Every station of the current snapshot, as markers.
async fn all_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let snapshot = state.registry.snapshot().await;

    Json(StationsResponse {
        fetched_at: snapshot.fetched_at,
        origin: origin_label(snapshot.origin),
        rejected: snapshot.rejected,
        bounds: state.view.bounds(&snapshot.stations),
        stations: state.view.markers(&snapshot.stations),
    })
}

/// Cycle paths, as polylines.
async fn all_paths(State(state): State<AppState>) -> Json<PathsResponse> {
    let snapshot = state.registry.snapshot().await;
    Json(PathsResponse {
        paths: state.view.polylines(&snapshot.paths),
    })
}

/// The `k` stations nearest a point, optionally only those within `radius`.
async fn nearest_stations(
    State(state): State<AppState>,
    query: Result<Query<NearestRequest>, QueryRejection>,
) -> Result<Json<NearestResponse>, AppError> {
    let Query(req) = query?;

    let reference = reference_point(req.lat, req.lon)?.ok_or_else(|| AppError::BadRequest {
        message: "lat and lon are required".to_string(),
    })?;
    let metric = match req.metric.as_deref() {
        Some(m) => m.parse::<DistanceMetric>().map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
        None => state.config.metric,
    };
    let k = state.config.result_count(req.k);

    let snapshot = state.registry.snapshot().await;
    let ranked = match req.radius {
        Some(radius) if !(radius.is_finite() && radius >= 0.0) => {
            return Err(AppError::BadRequest {
                message: format!("Invalid radius: {radius}"),
            });
        }
        Some(radius) => {
            let mut around = within(metric, &reference, &snapshot.stations, radius);
            around.truncate(k);
            around
        }
        None => nearest_with(metric, &reference, &snapshot.stations, k),
    };

    Ok(Json(NearestResponse {
        reference,
        metric,
        unit: metric.unit(),
        stations: state.view.ranked_markers(&ranked),
    }))
}

/// Fuzzy search by station name, optionally ranked by distance.
async fn search_stations(
    State(state): State<AppState>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(req) = query?;

    let threshold = match req.threshold {
        Some(t) => Threshold::new(t)?,
        None => state.config.threshold,
    };
    let max = state.config.max_results;
    let limit = req.limit.unwrap_or(max).min(max);
    let reference = reference_point(req.lat, req.lon)?;

    let snapshot = state.registry.snapshot().await;

    let (stations, best) = match reference {
        Some(reference) => {
            let mut ranked = search_near(
                &req.q,
                &snapshot.stations,
                threshold,
                &reference,
                state.config.metric,
            );
            ranked.truncate(limit);
            let markers = state.view.ranked_markers(&ranked);
            let best = markers.first().cloned();
            (markers, best)
        }
        None => {
            let mut found = search(&req.q, &snapshot.stations, threshold);
            found.truncate(limit);
            (state.view.markers(&found), None)
        }
    };

    Ok(Json(SearchResponse {
        query: req.q,
        threshold: threshold.value(),
        stations,
        best,
    }))
}

/// Geocode free text, then find the stations nearest the result.
async fn locate(
    State(state): State<AppState>,
    query: Result<Query<LocateRequest>, QueryRejection>,
) -> Result<Json<LocateResponse>, AppError> {
    let Query(req) = query?;

    let place = state
        .geocoder
        .locate(&req.q, Some(state.view.center()))
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("No place found for \"{}\"", req.q.trim()),
        })?;

    let metric = state.config.metric;
    let k = state.config.result_count(req.k);
    let snapshot = state.registry.snapshot().await;
    let ranked = nearest_with(metric, &place.location, &snapshot.stations, k);

    Ok(Json(LocateResponse {
        place,
        metric,
        unit: metric.unit(),
        stations: state.view.ranked_markers(&ranked),
    }))
}

/// Both coordinates, neither, or a 400.
fn reference_point(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Point>, AppError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(Point::new(lat, lon)?)),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest {
            message: "lat and lon must be given together".to_string(),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The geoservice or geocoder failed
    Upstream { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::EmptyQuery => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
