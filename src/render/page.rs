use std::collections::BTreeMap;

use super::OutputRegion;

/// Page output regions keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct Page {
    regions: BTreeMap<String, String>,
}

impl Page {
    pub fn regions(&self) -> &BTreeMap<String, String> {
        &self.regions
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

impl OutputRegion for Page {
    fn replace_content(&mut self, id: &str, markup: String) {
        self.regions.insert(id.to_string(), markup);
    }
}
