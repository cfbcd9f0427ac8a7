mod error;
mod loader;
mod options;
mod source;

pub use error::LoadError;
pub use loader::Loader;
pub use options::FetchOptions;
pub use source::Source;
