use super::error::RenderError;
use super::markup;
use super::options::RenderOptions;
use super::{MapView, OutputRegion};
use crate::descriptor::Descriptor;

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Draw a descriptor: recenter, overlay, marker, then the text dump.
    ///
    /// Markup is built before anything is touched, so an error leaves both
    /// the map and the page as they were.
    pub fn render<M, O>(
        &self,
        descriptor: &Descriptor,
        map: &mut M,
        output: &mut O,
    ) -> Result<(), RenderError>
    where
        M: MapView + ?Sized,
        O: OutputRegion + ?Sized,
    {
        let popup = markup::popup(descriptor)?;
        let info = markup::info(&descriptor.to_pretty_json()?)?;

        if self.options.clear_previous {
            map.clear_layers();
        }

        let center = descriptor.qth.coordinates;
        map.set_view(center, self.options.zoom);
        map.add_image_overlay(
            &descriptor.image.file,
            descriptor.image.bounds,
            self.options.opacity,
        );
        map.add_marker(center, popup);
        output.replace_content(&self.options.output_region, info);

        log::info!(
            "rendered {} at [{}, {}] with overlay {}",
            descriptor.name,
            center[0],
            center[1],
            descriptor.image.file
        );
        Ok(())
    }
}
