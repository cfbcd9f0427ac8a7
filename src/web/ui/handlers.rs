use axum::{extract::State, http::header, response::IntoResponse};

use crate::loader::LoadError;
use crate::render::RenderError;
use crate::web::api::error::ApiResult;
use crate::web::state::AppState;

use super::templates::MapTemplate;

pub async fn map(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let snapshot = state.view.lock().await.snapshot();
    let template = MapTemplate::new(
        &state.config.map,
        &state.config.render.output_region,
        &snapshot,
        true,
    )
    .map_err(|e| LoadError::Render(RenderError::Dump(e)))?;
    Ok(template)
}

/// Page script, compiled into the binary so the viewer runs from any directory.
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript")],
        include_str!("../static/webmap.js"),
    )
}
