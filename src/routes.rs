use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResponse};

pub fn create_routes(state: AppState) -> Router {
    let cors_permissive = state.config.server.cors_permissive;

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/translate", post(translate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend": state.backend.name()
    }))
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected translate request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        source_language = %request.source_language,
        destination_language = %request.destination_language,
        target_hardware = request.target_hardware.as_deref().unwrap_or("N/A"),
        source_len = request.source_code.len(),
        "Translate request"
    );

    let response = state.backend.translate(&request).await;
    info!(%request_id, status = %response.status, "Translate response");

    Ok(Json(response))
}
