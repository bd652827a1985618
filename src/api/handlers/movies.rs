use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, blocking};
use crate::api::models::{CreateMovieBody, MovieResponse};
use crate::database;

/// Provision the aggregate row a movie's score is written to.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateMovieBody>,
) -> impl IntoResponse {
    if body.movie_id.is_empty() {
        return (StatusCode::BAD_REQUEST, "movieId must not be empty").into_response();
    }

    let result = blocking(move || {
        let mut conn = database::get_connection(&state.pool)?;
        database::movies::ensure_movie(&mut conn, &body.movie_id, body.title.as_deref())
    })
    .await;

    match result {
        Ok(movie) => Json(MovieResponse::from(movie)).into_response(),
        Err(response) => response,
    }
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> impl IntoResponse {
    let result = blocking(move || {
        let mut conn = database::get_connection(&state.pool)?;
        database::movies::find_by_movie_id(&mut conn, &movie_id)
    })
    .await;

    match result {
        Ok(Some(movie)) => Json(MovieResponse::from(movie)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(response) => response,
    }
}
