/// Capture crop module
///
/// This module handles:
/// - Viewport and pixel geometry (geometry.rs)
/// - Mapping a selection over an aspect-fill preview to source pixels (transform.rs)
/// - EXIF orientation tags carried by captured photos (orientation.rs)
/// - Cropping a captured photo with the fallback to the original (apply.rs)
///
/// The same math serves the live camera overlay and the crop screen.

pub mod apply;
pub mod geometry;
pub mod orientation;
pub mod transform;

pub use apply::{crop, crop_or_original, OrientedImage};
pub use geometry::{PixelRect, Rect, Size};
pub use orientation::Orientation;
pub use transform::{compute, CropRequest};
