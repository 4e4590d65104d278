//! Static catalog of launchable desktop images.

mod images;
pub mod types;

pub use types::ImageInfo;

use crate::error::{OrchestratorError, Result};

pub fn lookup(id: &str) -> Result<&'static ImageInfo> {
    images::AVAILABLE_IMAGES
        .iter()
        .find(|image| image.id == id)
        .ok_or_else(|| OrchestratorError::InvalidImageId(id.to_string()))
}

/// Every image in declaration order.
pub fn list() -> &'static [ImageInfo] {
    images::AVAILABLE_IMAGES
}
