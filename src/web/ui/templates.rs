use askama::Template;
use askama_web::WebTemplate;

use crate::web::config::MapConfig;
use crate::web::state::Snapshot;

/// Leaflet page. `interactive` adds the file picker and URL form, which
/// talk to the viewer API; without it the page is a static export.
#[derive(Template, WebTemplate)]
#[template(path = "map.html")]
pub struct MapTemplate {
    pub title: String,
    pub tile_url: String,
    pub attribution: String,
    pub output_region: String,
    pub info: String,
    pub snapshot_json: String,
    pub interactive: bool,
}

impl MapTemplate {
    pub fn new(
        map: &MapConfig,
        output_region: &str,
        snapshot: &Snapshot,
        interactive: bool,
    ) -> serde_json::Result<Self> {
        let snapshot_json = serde_json::to_string(snapshot)?.replace("</", "<\\/");
        Ok(Self {
            title: "SPLAT! coverage map".to_string(),
            tile_url: map.tile_url.clone(),
            attribution: map.attribution.clone(),
            output_region: output_region.to_string(),
            info: snapshot
                .regions
                .get(output_region)
                .cloned()
                .unwrap_or_default(),
            snapshot_json,
            interactive,
        })
    }
}
