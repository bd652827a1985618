use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, blocking};
use crate::api::models::RankingBody;
use crate::database;
use crate::services::rankings::{remove_ranking, save_ranking};

pub async fn put_ranking(
    State(state): State<Arc<AppState>>,
    Path((user_id, movie_id)): Path<(String, String)>,
    Json(body): Json<RankingBody>,
) -> impl IntoResponse {
    let result = blocking(move || {
        let event = {
            let mut conn = database::get_connection(&state.pool)?;
            save_ranking(
                &mut conn,
                &user_id,
                &movie_id,
                body.rank_index.as_ref(),
                body.ranked,
                body.title.as_deref(),
            )?
        };
        state.recompute.handle_event(&event)
    })
    .await;

    match result {
        Ok(outcome) => Json(outcome).into_response(),
        Err(response) => response,
    }
}

pub async fn delete_ranking(
    State(state): State<Arc<AppState>>,
    Path((user_id, movie_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let result = blocking(move || {
        let event = {
            let mut conn = database::get_connection(&state.pool)?;
            remove_ranking(&mut conn, &user_id, &movie_id)?
        };
        event.map(|e| state.recompute.handle_event(&e)).transpose()
    })
    .await;

    match result {
        Ok(Some(outcome)) => Json(outcome).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(response) => response,
    }
}
