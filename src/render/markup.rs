use askama::Template;

use crate::descriptor::Descriptor;

#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    name: &'a str,
    height: f64,
    erp: f64,
}

#[derive(Template)]
#[template(path = "info.html")]
struct InfoTemplate<'a> {
    dump: &'a str,
}

/// Marker popup: site name, antenna height and ERP.
pub fn popup(descriptor: &Descriptor) -> askama::Result<String> {
    PopupTemplate {
        name: &descriptor.name,
        height: descriptor.qth.height,
        erp: descriptor.lrp.erp,
    }
    .render()
}

/// Preformatted block wrapping an already pretty-printed dump.
pub fn info(dump: &str) -> askama::Result<String> {
    InfoTemplate { dump }.render()
}
