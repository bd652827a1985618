use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    events::post_ranking_change,
    movies::{create_movie, get_movie},
    rankings::{delete_ranking, put_ranking},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/events/ranking-change", post(post_ranking_change))
        .route("/api/users/:user_id/rankings/:movie_id", put(put_ranking).delete(delete_ranking))
        .route("/api/movies", post(create_movie))
        .route("/api/movies/:movie_id", get(get_movie))
        .with_state(state)
}
