//! Rectangular neighborhoods over n-dimensional sources.
//!
//! A [`neighborhood::RectangleNeighborhoodCursor`] scans an access region and
//! hands out the window around each anchor. Windows are built once and
//! re-anchored in place. Anchors whose window lies inside the access region
//! are read without per-dimension bounds checks.

pub mod access;
pub mod error;
pub mod interval;
pub mod morphology;
pub mod neighborhood;
pub mod source;

mod memory;
pub use memory::ArrayRecycle;

#[cfg(test)]
mod unit_test;
