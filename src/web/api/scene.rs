use axum::{extract::State, Json};

use crate::web::state::{AppState, Snapshot};

#[utoipa::path(
    get,
    path = "/api/scene",
    tag = "scene",
    responses(
        (status = 200, description = "Current map layers and output regions", body = Snapshot)
    )
)]
pub async fn get_scene(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.view.lock().await.snapshot())
}

#[utoipa::path(
    delete,
    path = "/api/scene",
    tag = "scene",
    responses(
        (status = 200, description = "Map and output regions cleared", body = Snapshot)
    )
)]
pub async fn clear_scene(State(state): State<AppState>) -> Json<Snapshot> {
    let mut view = state.view.lock().await;
    view.clear();
    log::info!("scene cleared");
    Json(view.snapshot())
}
