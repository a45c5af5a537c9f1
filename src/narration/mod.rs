//! Narration assets, subtitle tracks and the synthesizer boundary.

pub(crate) mod asset;
pub(crate) mod probe;
pub(crate) mod srt;
