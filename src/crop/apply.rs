use image::DynamicImage;
use tracing::{debug, warn};

use super::geometry::{Rect, Size};
use super::orientation::Orientation;
use super::transform::{compute, CropRequest};
use crate::error::CropError;

/// Raw pixels plus the orientation needed to show them upright
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedImage {
    pub image: DynamicImage,
    pub orientation: Orientation,
}

impl OrientedImage {
    pub fn new(image: DynamicImage, orientation: Orientation) -> Self {
        Self { image, orientation }
    }

    /// Pixels that are already upright
    pub fn upright(image: DynamicImage) -> Self {
        Self::new(image, Orientation::Up)
    }

    /// Raw pixel dimensions, ignoring orientation
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Bake the orientation into the pixels
    pub fn into_upright(self) -> DynamicImage {
        self.orientation.apply(self.image)
    }
}

/// Crop `source` to the selection drawn over an aspect-fill preview.
///
/// Works on raw pixels and re-tags the result with the source orientation.
pub fn crop(source: &OrientedImage, viewport: Size, selection: Rect) -> Result<OrientedImage, CropError> {
    let request = CropRequest {
        viewport_size: viewport,
        selection,
        source_pixel_size: source.pixel_size(),
        source_orientation: source.orientation,
    };
    let rect = compute(&request)?;

    debug!(
        "✂️  Cropping {}x{} to {}x{} at ({}, {})",
        request.source_pixel_size.0,
        request.source_pixel_size.1,
        rect.width,
        rect.height,
        rect.x,
        rect.y
    );

    let cropped = source.image.crop_imm(rect.x, rect.y, rect.width, rect.height);
    Ok(OrientedImage::new(cropped, request.source_orientation))
}

/// Like `crop`, but keeps the uncropped photo when the crop cannot be made
pub fn crop_or_original(source: OrientedImage, viewport: Size, selection: Rect) -> OrientedImage {
    match crop(&source, viewport, selection) {
        Ok(cropped) => cropped,
        Err(e) => {
            warn!("⚠️  Keeping uncropped photo: {e}");
            source
        }
    }
}
