//! HTTP surface: four JSON endpoints under `/api`, CORS open to everyone.

use crate::error::ApiError;
use crate::models::{
    ModelsResponse, RateResponse, RatingRecord, RatingsResponse, SummaryRequest, SummaryResponse,
};
use crate::registry::ModelRegistry;
use crate::stats::calculate_statistics;
use crate::store::RatingStore;
use crate::summarizer::Summarizer;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub summarizer: Arc<Summarizer>,
    pub store: Arc<RatingStore>,
}

impl AppState {
    pub fn new(registry: Arc<ModelRegistry>, summarizer: Summarizer, store: RatingStore) -> Self {
        Self {
            registry,
            summarizer: Arc::new(summarizer),
            store: Arc::new(store),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/models", get(get_models))
        .route("/api/summarize", post(generate_summary))
        .route("/api/rate", post(rate_summary))
        .route("/api/ratings", get(get_ratings))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the router on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read listener address")?;
    tracing::info!(%addr, "summarizer showdown listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn get_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.registry.models().clone(),
    })
}

async fn generate_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summaries = state
        .summarizer
        .summarize_pair(&request.text, &request.model1, &request.model2)
        .await?;

    Ok(Json(SummaryResponse { summaries }))
}

async fn rate_summary(
    State(state): State<AppState>,
    Json(rating): Json<RatingRecord>,
) -> Result<Json<RateResponse>, ApiError> {
    let model_name = rating.model_name.clone();
    let total = state.store.append(rating)?;
    tracing::info!(model = %model_name, total, "rating saved");

    Ok(Json(RateResponse::saved()))
}

async fn get_ratings(State(state): State<AppState>) -> Result<Json<RatingsResponse>, ApiError> {
    let ratings = state.store.snapshot()?;

    let response = match calculate_statistics(&ratings) {
        Some(stats) => RatingsResponse::Rated { ratings, stats },
        None => RatingsResponse::empty(),
    };

    Ok(Json(response))
}
