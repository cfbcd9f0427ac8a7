mod error;
mod types;

pub use error::DescriptorError;
pub use types::{Bounds, Descriptor, LatLon};
