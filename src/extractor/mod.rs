//! Region extraction from rendered pages
//!
//! This module turns percentage-based crop rectangles into pixel regions
//! and cuts them out of page bitmaps. It performs no I/O.

mod region;
mod crop;
#[cfg(test)]
mod tests;

// Public exports
pub use region::{NormalizedRect, Region};
pub use crop::{extract, pixel_region};
