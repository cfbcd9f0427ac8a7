use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markup error: {0}")]
    Markup(#[from] askama::Error),
    #[error("JSON dump error: {0}")]
    Dump(#[from] serde_json::Error),
}
