use axum::{
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::loader::LoadError;

use super::api::load as load_handlers;
use super::api::scene as scene_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("setup failed: {0}")]
    Setup(#[from] LoadError),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let data_dir = state.config.map.data_dir.clone();

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::map))
        // Load API endpoints
        .route("/api/load/url", post(load_handlers::load_url))
        .route("/api/load/file", post(load_handlers::load_file))
        // Scene API endpoints
        .route(
            "/api/scene",
            get(scene_handlers::get_scene).delete(scene_handlers::clear_scene),
        )
        // Static files
        .route("/static/webmap.js", get(ui_handlers::script))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Overlay images, resolved relative to the page like the descriptor expects
        .fallback_service(ServeDir::new(data_dir))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    log::info!(
        "serving overlay images from {}",
        config.map.data_dir.display()
    );

    let state = AppState::new(config)?;
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
