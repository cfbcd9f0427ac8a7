use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::IntoStaticStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::MapView;
use crate::descriptor::{Bounds, LatLon};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct View {
    #[schema(value_type = Vec<f64>)]
    pub center: LatLon,
    pub zoom: u8,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageOverlay {
    pub id: Uuid,
    pub url: String,
    #[schema(value_type = Vec<Vec<f64>>)]
    pub bounds: Bounds,
    pub opacity: f64,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Marker {
    pub id: Uuid,
    #[schema(value_type = Vec<f64>)]
    pub position: LatLon,
    /// Popup markup, already escaped.
    pub popup: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema, IntoStaticStr)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    ImageOverlay(ImageOverlay),
    Marker(Marker),
}

impl Layer {
    pub fn id(&self) -> Uuid {
        match self {
            Layer::ImageOverlay(o) => o.id,
            Layer::Marker(m) => m.id,
        }
    }
}

/// In-memory map state: the current view plus every layer in the order it
/// was added. The web page replays it onto a Leaflet map.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Scene {
    pub view: Option<View>,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlays(&self) -> impl Iterator<Item = &ImageOverlay> {
        self.layers.iter().filter_map(|l| match l {
            Layer::ImageOverlay(o) => Some(o),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Marker(m) => Some(m),
            _ => None,
        })
    }

    fn push(&mut self, layer: Layer) {
        let kind: &'static str = (&layer).into();
        log::debug!("scene: added {} layer {}", kind, layer.id());
        self.layers.push(layer);
    }
}

impl MapView for Scene {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.view = Some(View { center, zoom });
    }

    fn add_image_overlay(&mut self, url: &str, bounds: Bounds, opacity: f64) {
        self.push(Layer::ImageOverlay(ImageOverlay {
            id: Uuid::new_v4(),
            url: url.to_string(),
            bounds,
            opacity,
            added_at: Utc::now(),
        }));
    }

    fn add_marker(&mut self, position: LatLon, popup: String) {
        self.push(Layer::Marker(Marker {
            id: Uuid::new_v4(),
            position,
            popup,
            added_at: Utc::now(),
        }));
    }

    fn clear_layers(&mut self) {
        if !self.layers.is_empty() {
            log::debug!("scene: clearing {} layers", self.layers.len());
        }
        self.layers.clear();
    }
}
