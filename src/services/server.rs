use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::{AppState, create_router};
use crate::config::settings::AppConfig;
use crate::database;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let store = &self.config.store;
        let pool = database::create_pool(&store.database_path, store.max_connections)?;
        info!("Using database {}", store.database_path);

        let state = Arc::new(AppState::new(pool, self.config.clone()));
        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
