use std::path::PathBuf;

use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
