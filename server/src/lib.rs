use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use streetfind::batch::BatchReader;
use streetfind::{Candidate, Catalog, Entity, EntityId, Point};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

/// Borrows hit names from the catalog; rendered before the handler returns.
#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub query: &'a str,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Candidate<'a>>,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub max_results: usize,
}

/// Loads the address section of a batch file (count line, then address
/// lines) and builds the catalog served by the app.
pub fn load_catalog(path: &std::path::Path) -> Result<Catalog> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let (catalog, skipped) = BatchReader::new(BufReader::new(file)).read_catalog()?;
    if skipped > 0 {
        tracing::warn!(skipped, "malformed address lines ignored");
    }
    Ok(catalog)
}

pub fn build_app(addresses: &std::path::Path, max_results: usize) -> Result<Router> {
    let catalog = load_catalog(addresses)?;
    Ok(app_with_catalog(Arc::new(catalog), max_results))
}

pub fn app_with_catalog(catalog: Arc<Catalog>, max_results: usize) -> Router {
    let app_state = AppState { catalog, max_results };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/street/:id", get(street_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Response, StatusCode> {
    if !params.lat.is_finite() || !params.lon.is_finite() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let start = std::time::Instant::now();
    let k = params.k.min(state.max_results);
    let origin = Point::new(params.lat, params.lon);

    let results = state.catalog.search(&params.q, origin, k);
    let elapsed = start.elapsed();
    tracing::debug!(q = %params.q, k, hits = results.len(), "search");
    let body = SearchResponse { query: &params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results };
    Ok(Json(body).into_response())
}

pub async fn street_handler(State(state): State<AppState>, Path(id): Path<EntityId>) -> Result<Json<Entity>, StatusCode> {
    let entity = state.catalog.entity(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(entity.clone()))
}
