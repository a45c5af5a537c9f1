use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::encode::ffmpeg::FfmpegSinkFactory;
use crate::encode::sink::{FrameSink, SinkConfig, SinkFactory};
use crate::foundation::core::Frame;
use crate::foundation::error::{ReelError, ReelResult};
use crate::narration::asset::NarrationAsset;
use crate::pipeline::cancel::CancelToken;

/// An encoded video handed over to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoOutput {
    /// Encoded file.
    pub path: PathBuf,
    /// Number of video frames written.
    pub frame_count: u64,
    /// Frames per second.
    pub frame_rate: u32,
    /// Whether a narration track was muxed.
    pub has_audio: bool,
}

impl VideoOutput {
    /// Video track length in seconds.
    pub fn video_duration_secs(&self) -> f64 {
        self.frame_count as f64 / f64::from(self.frame_rate.max(1))
    }
}

/// Streams frames into a [`FrameSink`] and attaches narration audio.
#[derive(Clone)]
pub struct VideoCompositor {
    sinks: Arc<dyn SinkFactory>,
}

impl std::fmt::Debug for VideoCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoCompositor").finish_non_exhaustive()
    }
}

impl Default for VideoCompositor {
    fn default() -> Self {
        Self::new(Arc::new(FfmpegSinkFactory))
    }
}

impl VideoCompositor {
    /// Compositor writing through `sinks`.
    pub fn new(sinks: Arc<dyn SinkFactory>) -> Self {
        Self { sinks }
    }

    /// Encode `frames` at `frame_rate` into `output_path`.
    ///
    /// On failure nothing is left at `output_path`. On success a temporary narration file is
    /// released.
    #[tracing::instrument(skip(self, frames, narration, cancel), fields(frames = frames.len()))]
    pub fn compose(
        &self,
        frames: &[Frame],
        frame_rate: u32,
        narration: Option<&NarrationAsset>,
        output_path: &Path,
        cancel: &CancelToken,
    ) -> ReelResult<VideoOutput> {
        let res = self.encode(frames, frame_rate, narration, output_path, cancel);
        match res {
            Ok(out) => {
                if let Some(asset) = narration {
                    asset.release();
                }
                let video_secs = out.video_duration_secs();
                if let Some(asset) = narration
                    && asset.duration_secs > video_secs
                {
                    tracing::debug!(
                        video_secs,
                        audio_secs = asset.duration_secs,
                        "narration runs past the last frame"
                    );
                }
                tracing::info!(
                    path = %out.path.display(),
                    frames = out.frame_count,
                    secs = video_secs,
                    audio = out.has_audio,
                    "video encoded"
                );
                Ok(out)
            }
            Err(e) => {
                remove_partial_output(output_path);
                Err(e)
            }
        }
    }

    fn encode(
        &self,
        frames: &[Frame],
        frame_rate: u32,
        narration: Option<&NarrationAsset>,
        output_path: &Path,
        cancel: &CancelToken,
    ) -> ReelResult<VideoOutput> {
        let first = frames
            .first()
            .ok_or_else(|| ReelError::invalid_input("cannot encode an empty frame sequence"))?;
        if frame_rate == 0 {
            return Err(ReelError::invalid_input("frame_rate must be > 0"));
        }
        let canvas = first.canvas();
        if let Some(i) = frames.iter().position(|f| f.canvas() != canvas) {
            return Err(ReelError::invalid_input(format!(
                "frame {i} is {}x{}, expected {}x{}",
                frames[i].width(),
                frames[i].height(),
                canvas.width,
                canvas.height
            )));
        }
        cancel.check()?;

        let mut sink: Box<dyn FrameSink> = self.sinks.open(output_path)?;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            frame_rate,
            audio: narration.map(NarrationAsset::audio_input),
        })?;
        for (idx, frame) in (0u64..).zip(frames) {
            cancel.check()?;
            sink.push_frame(idx, frame)?;
        }
        sink.end()?;

        Ok(VideoOutput {
            path: output_path.to_path_buf(),
            frame_count: frames.len() as u64,
            frame_rate,
            has_audio: narration.is_some(),
        })
    }
}

/// Best-effort removal of a partially written output file.
pub(crate) fn remove_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/compositor.rs"]
mod tests;
