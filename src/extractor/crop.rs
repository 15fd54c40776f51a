//! Region extraction from rendered page bitmaps

use image::{DynamicImage, GenericImageView};
use log::debug;

use crate::errors::ExamResult;

use super::region::{NormalizedRect, Region};

/// Compute the pixel bounds of `rect` on a `width` x `height` bitmap
///
/// # Returns
/// The pixel region, or `InvalidRegion`/`EmptyRegion` as described on
/// [`NormalizedRect::to_pixel_region`]
pub fn pixel_region(width: u32, height: u32, rect: &NormalizedRect) -> ExamResult<Region> {
    rect.to_pixel_region(width, height)
}

/// Extract the part of `bitmap` covered by `rect`
///
/// The source bitmap is left untouched; the returned image owns a copy of
/// the selected pixels.
pub fn extract(bitmap: &DynamicImage, rect: &NormalizedRect) -> ExamResult<DynamicImage> {
    let (width, height) = bitmap.dimensions();
    let region = pixel_region(width, height, rect)?;

    debug!(
        "Cropping {}x{} page at x={}, y={}, width={}, height={}",
        width, height, region.x, region.y, region.width, region.height
    );

    Ok(bitmap.crop_imm(region.x, region.y, region.width, region.height))
}
