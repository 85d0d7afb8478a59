pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod observability;
pub mod pagination;
pub mod routes;

pub use config::Config;
pub use routes::AppState;

use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Full application router with its middleware stack.
pub fn create_app(config: Config, state: foodgram_shared::State) -> axum::Router {
    routes::router(AppState::new(config, state))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
