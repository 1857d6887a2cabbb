use super::geometry::{PixelRect, Rect, Size};
use super::orientation::Orientation;
use crate::error::CropError;

/// Everything needed to map a selection drawn over a preview to source pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRequest {
    /// Size of the preview the selection was drawn on, in points
    pub viewport_size: Size,
    /// Selection in viewport points
    pub selection: Rect,
    /// Raw pixel dimensions of the captured photo, before orientation is applied
    pub source_pixel_size: (u32, u32),
    /// Orientation tag of the captured photo; passes through untouched
    pub source_orientation: Orientation,
}

/// Scale and offsets of an aspect-fill preview relative to the source
#[derive(Debug, Clone, Copy, PartialEq)]
struct AspectFill {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl AspectFill {
    fn new(viewport: Size, source: Size) -> Self {
        if source.aspect_ratio() > viewport.aspect_ratio() {
            // Wider source fills the height, sides overflow
            let scale = source.height / viewport.height;
            Self {
                scale,
                offset_x: (source.width - viewport.width * scale) / 2.0,
                offset_y: 0.0,
            }
        } else {
            // Taller (or equal) source fills the width, top and bottom overflow
            let scale = source.width / viewport.width;
            Self {
                scale,
                offset_x: 0.0,
                offset_y: (source.height - viewport.height * scale) / 2.0,
            }
        }
    }
}

/// Map the selection to a crop rectangle in source pixel space.
///
/// The preview shows the source aspect-filled, so one uniform scale maps
/// points to pixels and the overflowing axis is offset by half its excess.
/// The result is clamped inside the source: origin first, then extent.
///
/// Returns `DegenerateCrop` when the selection is not finite or nothing is
/// left after clamping; the caller should keep using the uncropped photo.
pub fn compute(request: &CropRequest) -> Result<PixelRect, CropError> {
    let viewport = request.viewport_size;
    if !viewport.has_area() {
        return Err(CropError::EmptyViewport);
    }
    let (source_width, source_height) = request.source_pixel_size;
    if source_width == 0 || source_height == 0 {
        return Err(CropError::EmptySource);
    }
    let source = Size::from(request.source_pixel_size);

    let selection = request.selection;
    if !selection.is_finite() {
        return Err(CropError::DegenerateCrop {
            width: selection.width,
            height: selection.height,
        });
    }

    let fill = AspectFill::new(viewport, source);

    let crop_x = selection.x * fill.scale + fill.offset_x;
    let crop_y = selection.y * fill.scale + fill.offset_y;
    let crop_width = selection.width * fill.scale;
    let crop_height = selection.height * fill.scale;

    let x = crop_x.min(source.width - crop_width).max(0.0);
    let y = crop_y.min(source.height - crop_height).max(0.0);
    let width = crop_width.min(source.width - x);
    let height = crop_height.min(source.height - y);

    if !(width > 0.0 && height > 0.0) {
        return Err(CropError::DegenerateCrop { width, height });
    }

    let px = (x.round() as u32).min(source_width);
    let py = (y.round() as u32).min(source_height);
    let pw = (width.round() as u32).min(source_width - px);
    let ph = (height.round() as u32).min(source_height - py);

    if pw == 0 || ph == 0 {
        return Err(CropError::DegenerateCrop { width, height });
    }

    Ok(PixelRect::new(px, py, pw, ph))
}
