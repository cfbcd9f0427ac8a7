use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use utoipa::ToSchema;

use crate::descriptor::Descriptor;
use crate::loader::{LoadError, Loader};
use crate::render::{Page, RenderError, Renderer, Scene};

use super::config::Config;

/// Everything drawn so far: map layers and page regions.
#[derive(Debug, Default)]
pub struct MapState {
    pub scene: Scene,
    pub page: Page,
}

impl MapState {
    pub fn render(&mut self, renderer: &Renderer, descriptor: &Descriptor) -> Result<(), RenderError> {
        renderer.render(descriptor, &mut self.scene, &mut self.page)?;
        log::debug!(
            "scene holds {} overlays and {} markers",
            self.scene.overlays().count(),
            self.scene.markers().count()
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.scene = Scene::new();
        self.page.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            scene: self.scene.clone(),
            regions: self.page.regions().clone(),
        }
    }
}

/// What the page needs to redraw itself.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Snapshot {
    pub scene: Scene,
    /// Output region id to markup.
    pub regions: BTreeMap<String, String>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub loader: Arc<Loader>,
    pub renderer: Arc<Renderer>,
    pub view: Arc<Mutex<MapState>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LoadError> {
        let loader = Loader::new(&config.fetch)?;
        let renderer = Renderer::new(config.render.clone());
        Ok(Self {
            config: Arc::new(config),
            loader: Arc::new(loader),
            renderer: Arc::new(renderer),
            view: Arc::new(Mutex::new(MapState::default())),
        })
    }
}
