//! Caption and watermark rendering.

pub(crate) mod compositor;
pub(crate) mod font;
pub(crate) mod layout;
pub(crate) mod overlay;
pub(crate) mod wrap;
