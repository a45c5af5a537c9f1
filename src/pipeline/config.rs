use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::caption::compositor::CaptionConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::services::openai::OpenAiConfig;

/// Shortest accepted target duration in seconds.
pub const MIN_DURATION_SECS: f64 = 5.0;
/// Longest accepted target duration in seconds.
pub const MAX_DURATION_SECS: f64 = 30.0;

/// Everything a run needs besides its collaborators.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Output frames per second.
    pub frame_rate: u32,
    /// Number of key frames requested from the supplier.
    pub key_frame_count: usize,
    /// Target canvas. `None` adopts the first key frame's size.
    pub canvas: Option<Canvas>,
    /// Caption and watermark styling.
    pub caption: CaptionConfig,
    /// Whether the watermark is drawn.
    pub watermark_enabled: bool,
    /// Default output file.
    pub output_path: PathBuf,
    /// Acquire key frames concurrently.
    pub parallel_acquisition: bool,
    /// Style guide handed to the prompt enhancer; ignored when the file is missing.
    pub style_guide_path: Option<PathBuf>,
    /// Where to write the subtitle track, if anywhere.
    pub subtitle_path: Option<PathBuf>,
    /// Parent of per-run work directories. `None` uses the system temp dir.
    pub workdir: Option<PathBuf>,
    /// Remote API settings.
    pub openai: OpenAiConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            key_frame_count: 4,
            canvas: None,
            caption: CaptionConfig::default(),
            watermark_enabled: true,
            output_path: PathBuf::from("generated_video.mp4"),
            parallel_acquisition: false,
            style_guide_path: Some(PathBuf::from("video_instruction.txt")),
            subtitle_path: None,
            workdir: None,
            openai: OpenAiConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::invalid_input(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse JSON configuration from a reader.
    pub fn from_reader(r: impl Read) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::invalid_input(format!("config JSON parse failed: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every field range, including nested configuration.
    pub fn validate(&self) -> ReelResult<()> {
        if self.frame_rate == 0 {
            return Err(ReelError::invalid_input("frame_rate must be > 0"));
        }
        if self.key_frame_count == 0 {
            return Err(ReelError::invalid_input("key_frame_count must be >= 1"));
        }
        if let Some(c) = self.canvas {
            Canvas::new(c.width, c.height)?;
            if c.width % 2 != 0 || c.height % 2 != 0 {
                return Err(ReelError::invalid_input(format!(
                    "canvas {}x{} must have even dimensions",
                    c.width, c.height
                )));
            }
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ReelError::invalid_input("output_path must be non-empty"));
        }
        self.caption.validate()?;
        self.openai.validate()?;
        Ok(())
    }
}

/// Reject durations outside `[MIN_DURATION_SECS, MAX_DURATION_SECS]`.
pub fn validate_duration(duration_secs: f64) -> ReelResult<()> {
    if !duration_secs.is_finite() || !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration_secs)
    {
        return Err(ReelError::invalid_input(format!(
            "duration must be between {MIN_DURATION_SECS} and {MAX_DURATION_SECS} seconds, got {duration_secs}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
