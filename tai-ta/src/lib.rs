//! tai-ta library interface for testing
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod config;
pub mod error;
pub mod resolver;
pub mod services;
pub mod taxonomy;
pub mod validators;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::resolver::LabelResolver;
use crate::services::{ClassifierClient, GeologyClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved service configuration
    pub config: Arc<ServiceConfig>,
    /// Vision classifier adapter (image path)
    pub classifier: Arc<ClassifierClient>,
    /// Remote geology service client (coordinate path)
    pub geology: Arc<GeologyClient>,
    /// Label resolution engine
    pub resolver: Arc<LabelResolver>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last analysis error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        let classifier = ClassifierClient::new(
            config.classifier.endpoint.clone(),
            config.classifier.api_key.clone(),
            Duration::from_secs(config.classifier.timeout_seconds),
        )?;

        let geology = GeologyClient::new(
            &config.geology.base_url,
            Duration::from_secs(config.geology.timeout_seconds),
        )?;

        Ok(Self {
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            geology: Arc::new(geology),
            resolver: Arc::new(LabelResolver::new()),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::classify_routes())
        .merge(api::geology_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser frontend runs on a different origin
        .layer(CorsLayer::permissive())
}
