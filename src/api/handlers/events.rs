use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, blocking};
use crate::domain::RankingChangeEvent;

/// Entry point for an external change feed delivering ranking changes.
pub async fn post_ranking_change(
    State(state): State<Arc<AppState>>,
    Json(event): Json<RankingChangeEvent>,
) -> impl IntoResponse {
    match blocking(move || state.recompute.handle_event(&event)).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(response) => response,
    }
}
