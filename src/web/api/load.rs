use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::descriptor::Descriptor;
use crate::loader::LoadError;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::{AppState, Snapshot};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoadUrlRequest {
    /// http(s) URL of a descriptor.
    pub url: String,
}

#[utoipa::path(
    post,
    path = "/api/load/url",
    tag = "load",
    request_body = LoadUrlRequest,
    responses(
        (status = 200, description = "Descriptor rendered", body = Snapshot),
        (status = 400, description = "Bad URL or invalid descriptor", body = ErrorResponse),
        (status = 502, description = "Descriptor could not be fetched", body = ErrorResponse)
    )
)]
pub async fn load_url(
    State(state): State<AppState>,
    Json(request): Json<LoadUrlRequest>,
) -> ApiResult<Json<Snapshot>> {
    let url = state.loader.check_url(&request.url)?;
    let descriptor = state
        .loader
        .fetch(&url)
        .await
        .inspect_err(|e| log::warn!("network load failed: {}", e))?;

    render(&state, &descriptor).await
}

#[utoipa::path(
    post,
    path = "/api/load/file",
    tag = "load",
    request_body(content = String, content_type = "application/json"),
    responses(
        (status = 200, description = "Descriptor rendered", body = Snapshot),
        (status = 400, description = "Invalid descriptor", body = ErrorResponse)
    )
)]
pub async fn load_file(State(state): State<AppState>, body: String) -> ApiResult<Json<Snapshot>> {
    let descriptor = Descriptor::from_json(&body)
        .map_err(LoadError::from)
        .inspect_err(|e| log::warn!("file load failed: {}", e))?;

    render(&state, &descriptor).await
}

async fn render(state: &AppState, descriptor: &Descriptor) -> ApiResult<Json<Snapshot>> {
    let mut view = state.view.lock().await;
    view.render(&state.renderer, descriptor)?;
    Ok(Json(view.snapshot()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::fixtures::{FULL_SITE, TEST_SITE};
    use crate::web::api::error::ApiError;
    use crate::web::Config;
    use axum::{routing::get, Router};

    fn state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn file_upload_renders_into_shared_state() {
        let state = state();
        let Json(snapshot) = load_file(State(state.clone()), TEST_SITE.to_string())
            .await
            .unwrap();

        assert_eq!(snapshot.scene.layers.len(), 2);
        assert!(snapshot.regions["info"].contains("TestSite"));
        assert_eq!(state.view.lock().await.scene.layers.len(), 2);
    }

    #[tokio::test]
    async fn uploads_accumulate() {
        let state = state();
        load_file(State(state.clone()), TEST_SITE.to_string())
            .await
            .unwrap();
        let Json(snapshot) = load_file(State(state.clone()), FULL_SITE.to_string())
            .await
            .unwrap();

        assert_eq!(snapshot.scene.overlays().count(), 2);
        assert_eq!(snapshot.scene.markers().count(), 2);
        assert!(snapshot.regions["info"].contains("Hilltop Repeater"));
    }

    #[tokio::test]
    async fn bad_upload_leaves_state_untouched() {
        let state = state();
        load_file(State(state.clone()), TEST_SITE.to_string())
            .await
            .unwrap();

        let result = load_file(State(state.clone()), "{\"name\":".to_string()).await;
        assert!(matches!(
            result,
            Err(ApiError::Load(LoadError::Descriptor(_)))
        ));

        let view = state.view.lock().await;
        assert_eq!(view.scene.layers.len(), 2);
        assert!(view.page.regions()["info"].contains("TestSite"));
    }

    #[tokio::test]
    async fn url_load_fetches_and_renders() {
        let app = Router::new().route("/site.json", get(|| async { TEST_SITE }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let request = LoadUrlRequest {
            url: format!("http://{}/site.json", addr),
        };
        let Json(snapshot) = load_url(State(state()), Json(request)).await.unwrap();

        let view = snapshot.scene.view.as_ref().unwrap();
        assert_eq!(view.center, [40.0, -74.0]);
        assert_eq!(view.zoom, 11);
        assert_eq!(snapshot.scene.overlays().next().unwrap().opacity, 0.7);
    }

    #[tokio::test]
    async fn url_load_rejects_bad_scheme() {
        let request = LoadUrlRequest {
            url: "ftp://example.org/site.json".into(),
        };
        let result = load_url(State(state()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
