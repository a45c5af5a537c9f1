//! Frame sequence + optional narration -> encoded video file.

pub(crate) mod compositor;
