//! Region structures for defining extraction area
//!
//! Crop areas are configured as [`NormalizedRect`]s, fractions of the
//! rendered page, so a table stays valid whatever zoom the page was
//! rendered at. At extraction time they are scaled against the actual
//! bitmap into a pixel [`Region`], where (0,0) is the top-left corner.

use std::fmt;

use crate::errors::{ExamError, ExamResult};

/// Region for image extraction (in pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Get the rightmost X coordinate (exclusive)
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }
}

/// Crop rectangle expressed as fractions of page width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl NormalizedRect {
    /// Create a rectangle, checking that it is well formed
    ///
    /// # Returns
    /// The rectangle, or `InvalidRegion` if a coordinate is outside
    /// [0, 1] or the edges are inverted
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> ExamResult<Self> {
        let rect = NormalizedRect { left, top, right, bottom };
        rect.validate()?;
        Ok(rect)
    }

    /// The rectangle covering the whole page
    pub fn full_page() -> Self {
        NormalizedRect { left: 0.0, top: 0.0, right: 1.0, bottom: 1.0 }
    }

    /// Build from a `[left, top, right, bottom]` array as found in crop tables
    pub fn from_array(coords: [f64; 4]) -> ExamResult<Self> {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }

    /// Check the precondition every extraction relies on
    pub fn validate(&self) -> ExamResult<()> {
        let edges = [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ];
        for (name, value) in edges {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ExamError::InvalidRegion(format!(
                    "{} edge {} is outside [0.0, 1.0] in {}",
                    name, value, self
                )));
            }
        }

        if self.left >= self.right {
            return Err(ExamError::InvalidRegion(format!(
                "left edge must be less than right edge in {}",
                self
            )));
        }
        if self.top >= self.bottom {
            return Err(ExamError::InvalidRegion(format!(
                "top edge must be less than bottom edge in {}",
                self
            )));
        }

        Ok(())
    }

    /// Scale to pixel bounds on a `width` x `height` bitmap
    ///
    /// Each edge is truncated (`floor(dimension * fraction)`), so the result
    /// is a pure function of the bitmap size and the rectangle.
    ///
    /// # Returns
    /// The pixel region, `InvalidRegion` for a malformed rectangle, or
    /// `EmptyRegion` if truncation leaves no pixels
    pub fn to_pixel_region(&self, width: u32, height: u32) -> ExamResult<Region> {
        self.validate()?;

        let left = scale(width, self.left);
        let top = scale(height, self.top);
        let right = scale(width, self.right);
        let bottom = scale(height, self.bottom);

        if right <= left || bottom <= top {
            return Err(ExamError::EmptyRegion {
                width,
                height,
                region: self.to_string(),
            });
        }

        Ok(Region::new(left, top, right - left, bottom - top))
    }
}

impl fmt::Display for NormalizedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.left, self.top, self.right, self.bottom)
    }
}

// Fractions are in [0, 1], so the product never exceeds `dimension`.
fn scale(dimension: u32, fraction: f64) -> u32 {
    (dimension as f64 * fraction).floor() as u32
}
