use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("unexpected descriptor shape: {0}")]
    Shape(#[source] serde_json::Error),
}
