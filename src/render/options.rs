use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub zoom: u8,
    pub opacity: f64,
    /// Id of the page region that receives the descriptor dump.
    pub output_region: String,
    /// Remove earlier overlays and markers before drawing. Off by default,
    /// so repeated loads pile up on the map.
    pub clear_previous: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            zoom: 11,
            opacity: 0.7,
            output_region: "info".to_string(),
            clear_previous: false,
        }
    }
}
