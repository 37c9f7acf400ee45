use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::database::SemesterStores;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let stores = SemesterStores::open(&self.config.storage)?;
        let state = Arc::new(AppState::new(stores, self.config.clone()));

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(
            "Server listening on {} (weighting: {})",
            addr, self.config.grading.weighting_scheme
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
