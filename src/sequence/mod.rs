//! Key-frame sets and the frame interpolator.

pub(crate) mod interpolate;
pub(crate) mod keyframes;
