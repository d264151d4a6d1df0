//! Thin wrappers around the `image` encoders that pass through encoder settings.

pub mod bmp;
pub mod jpeg;
pub mod png;
