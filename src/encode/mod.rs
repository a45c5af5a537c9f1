//! Encoding sinks.
//!
//! Sinks consume captioned frames in playback order and are driven by the video compositor.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
