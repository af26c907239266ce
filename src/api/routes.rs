use super::error::{handle_panic, ApiError};
use crate::domain::{AggregatedGame, BatchResponse};
use crate::services::Aggregator;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
struct AppState {
    aggregator: Aggregator,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    game_name: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    games: Option<Value>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    version: &'static str,
}

pub fn router(aggregator: Aggregator) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/search", post(search))
        .route("/api/batch-search", post(batch_search))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .with_state(AppState { aggregator })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        message: "Games Hub Scraper API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// A body that is not JSON, or not an object, counts as a missing field.
async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<AggregatedGame>, ApiError> {
    let game_name = payload
        .ok()
        .and_then(|Json(req)| req.game_name)
        .and_then(|name| name.as_str().map(str::to_owned))
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Game name is required".to_string()))?;

    let game = state.aggregator.search(&game_name).await?;
    Ok(Json(game))
}

async fn batch_search(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Some(Value::Array(games)) = payload.ok().and_then(|Json(req)| req.games) else {
        return Err(ApiError::BadRequest("Games array is required".to_string()));
    };

    Ok(Json(state.aggregator.batch_search(&games).await))
}
