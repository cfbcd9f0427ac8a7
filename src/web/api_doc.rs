use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::load::LoadUrlRequest;
use super::state::Snapshot;
use crate::render::{ImageOverlay, Layer, Marker, Scene, View};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::load::load_url,
        super::api::load::load_file,
        super::api::scene::get_scene,
        super::api::scene::clear_scene,
    ),
    components(
        schemas(
            LoadUrlRequest,
            Snapshot,
            Scene,
            View,
            Layer,
            ImageOverlay,
            Marker,
            ErrorResponse,
        )
    ),
    info(
        title = "SPLAT! Web Map API",
        description = "Load SPLAT! coverage descriptors and inspect the rendered map",
        version = "0.1.0"
    ),
    tags(
        (name = "load", description = "Descriptor loading"),
        (name = "scene", description = "Rendered map state")
    )
)]
pub struct ApiDoc;
