use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::errors::StoreError;
use crate::services::RecomputeService;

pub mod events;
pub mod movies;
pub mod rankings;

pub struct AppState {
    pub pool: DbPool,
    pub recompute: RecomputeService,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        let recompute = RecomputeService::new(pool.clone(), config.ranking);
        Self { pool, recompute }
    }
}

/// Run store work off the async runtime and map failures to a 500.
async fn blocking<T, F>(work: F) -> Result<T, Response>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(store_failure(e)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Task Error: {}", e)).into_response()),
    }
}

fn store_failure(e: StoreError) -> Response {
    let message = match e.remediation() {
        Some(fix) => format!("Store Error: {}. {}", e, fix),
        None => format!("Store Error: {}", e),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
