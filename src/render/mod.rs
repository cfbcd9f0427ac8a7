mod error;
mod markup;
mod options;
mod page;
mod renderer;
mod scene;

pub use error::RenderError;
pub use options::RenderOptions;
pub use page::Page;
pub use renderer::Renderer;
pub use scene::{ImageOverlay, Layer, Marker, Scene, View};

use crate::descriptor::{Bounds, LatLon};

/// The map widget a descriptor is drawn onto.
pub trait MapView {
    fn set_view(&mut self, center: LatLon, zoom: u8);
    fn add_image_overlay(&mut self, url: &str, bounds: Bounds, opacity: f64);
    fn add_marker(&mut self, position: LatLon, popup: String);
    /// Remove every overlay and marker added so far.
    fn clear_layers(&mut self);
}

/// Addressable page areas whose content can be replaced with markup.
pub trait OutputRegion {
    fn replace_content(&mut self, id: &str, markup: String);
}
