use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::caption::compositor::TextCompositor;
use crate::encode::sink::SinkFactory;
use crate::foundation::core::{Canvas, Frame, Quality};
use crate::foundation::error::{PipelineFailure, ReelError, ReelResult, Stage};
use crate::narration::asset::{DisabledNarration, NarrationOutcome, NarrationSynthesizer};
use crate::narration::srt::write_srt;
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::config::PipelineConfig;
use crate::sequence::interpolate::{interpolate, total_frames};
use crate::sequence::keyframes::KeyFrameSet;
use crate::services::enhance::{PromptEnhancer, enhance_or_fallback, load_style_guide};
use crate::services::images::{KeyFrameSupplier, key_frame_prompt};
use crate::video::compositor::{VideoCompositor, VideoOutput};

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// The encoded video.
    pub output: VideoOutput,
    /// Prompt used for key frames, caption and narration.
    pub prompt: String,
    /// Stages visited, from `Start` to `Done`.
    pub stages: Vec<Stage>,
    /// Why narration is missing, when the video is silent.
    pub silent_reason: Option<String>,
    /// Subtitle file written next to the video, if configured and narrated.
    pub subtitle_path: Option<PathBuf>,
}

/// Runs the whole text-to-video flow with injected collaborators.
pub struct Pipeline {
    config: PipelineConfig,
    enhancer: Option<Arc<dyn PromptEnhancer>>,
    narrator: Arc<dyn NarrationSynthesizer>,
    video: VideoCompositor,
    captions: Option<TextCompositor>,
    cancel: CancelToken,
}

impl Pipeline {
    /// A pipeline without enhancement or narration that encodes with `ffmpeg`.
    pub fn new(config: PipelineConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            enhancer: None,
            narrator: Arc::new(DisabledNarration),
            video: VideoCompositor::default(),
            captions: None,
            cancel: CancelToken::new(),
        })
    }

    /// Use `enhancer` to rewrite the prompt before acquisition.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn PromptEnhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Use `narrator` for the audio track.
    pub fn with_narrator(mut self, narrator: Arc<dyn NarrationSynthesizer>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Encode through `sinks` instead of `ffmpeg`.
    pub fn with_sink_factory(mut self, sinks: Arc<dyn SinkFactory>) -> Self {
        self.video = VideoCompositor::new(sinks);
        self
    }

    /// Use a prebuilt text compositor instead of resolving the configured font on first use.
    pub fn with_text_compositor(mut self, captions: TextCompositor) -> Self {
        self.captions = Some(captions);
        self
    }

    /// Observe `cancel` at every stage boundary and between frames.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate a video and return its path.
    pub fn run(
        &mut self,
        prompt: &str,
        duration_secs: f64,
        quality: Quality,
        supplier: &dyn KeyFrameSupplier,
    ) -> Result<PathBuf, PipelineFailure> {
        self.run_with_report(prompt, duration_secs, quality, supplier, None)
            .map(|r| r.output.path)
    }

    /// Generate a video, optionally overriding the configured output path.
    #[tracing::instrument(skip(self, prompt, supplier, output_path), fields(quality = quality.name()))]
    pub fn run_with_report(
        &mut self,
        prompt: &str,
        duration_secs: f64,
        quality: Quality,
        supplier: &dyn KeyFrameSupplier,
        output_path: Option<&Path>,
    ) -> Result<RunReport, PipelineFailure> {
        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.output_path.clone());
        let mut tracker = StageTracker::new();
        let res = self.run_stages(
            &mut tracker,
            prompt,
            duration_secs,
            quality,
            supplier,
            &output_path,
        );
        match res {
            Ok(mut report) => {
                tracker.advance();
                report.stages = tracker.visited;
                tracing::info!(path = %report.output.path.display(), "run finished");
                Ok(report)
            }
            Err(source) => {
                let stage = tracker.pending();
                tracing::error!(stage = %stage, error = %source, "run failed");
                Err(PipelineFailure::new(stage, source))
            }
        }
    }

    fn run_stages(
        &mut self,
        tracker: &mut StageTracker,
        prompt: &str,
        duration_secs: f64,
        quality: Quality,
        supplier: &dyn KeyFrameSupplier,
        output_path: &Path,
    ) -> ReelResult<RunReport> {
        // PromptReady
        self.cancel.check()?;
        let user_text = prompt.trim();
        if user_text.is_empty() {
            return Err(ReelError::invalid_input("prompt must not be empty"));
        }
        total_frames(duration_secs, self.config.frame_rate)?;
        let prompt = match self.enhancer.as_deref() {
            Some(enhancer) => {
                let guide = load_style_guide(self.config.style_guide_path.as_deref());
                enhance_or_fallback(enhancer, user_text, &guide)
            }
            None => user_text.to_string(),
        };
        tracker.advance();

        // KeyFramesAcquired
        self.cancel.check()?;
        let key_frames =
            acquire_key_frames(&self.config, &self.cancel, &prompt, quality, supplier)?;
        tracker.advance();

        // SequenceInterpolated
        self.cancel.check()?;
        let sequence = interpolate(&key_frames, duration_secs, self.config.frame_rate)?;
        drop(key_frames);
        tracker.advance();

        // Captioned
        self.cancel.check()?;
        let mut captions = match self.captions.take() {
            Some(c) => c,
            None => TextCompositor::new(self.config.caption.clone())?,
        };
        let overlay = captions.prepare(sequence.canvas(), &prompt, self.config.watermark_enabled);
        self.captions = Some(captions);
        let overlay = overlay?;
        let mut frames = sequence.into_frames();
        overlay.apply_in_place(&mut frames, &self.cancel)?;
        drop(overlay);
        tracker.advance();

        // NarrationAttempted
        self.cancel.check()?;
        let workdir = RunWorkDir::create(self.config.workdir.as_deref())?;
        let outcome =
            NarrationOutcome::from(self.narrator.synthesize(&prompt, duration_secs, workdir.path()));
        let mut subtitle_path = None;
        let silent_reason = match &outcome {
            NarrationOutcome::Narrated(asset) => {
                tracing::info!(audio_secs = asset.duration_secs, "narration ready");
                if let Some(path) = self.config.subtitle_path.as_deref() {
                    match write_srt(path, &asset.subtitles) {
                        Ok(()) => subtitle_path = Some(path.to_path_buf()),
                        Err(e) => tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "could not write subtitles; continuing without them"
                        ),
                    }
                }
                None
            }
            NarrationOutcome::Silent { reason } => {
                tracing::warn!(reason = %reason, "narration unavailable; producing a silent video");
                Some(reason.clone())
            }
        };
        tracker.advance();

        // Encoded
        self.cancel.check()?;
        let output = self.video.compose(
            &frames,
            self.config.frame_rate,
            outcome.asset(),
            output_path,
            &self.cancel,
        )?;
        tracker.advance();

        Ok(RunReport {
            output,
            prompt,
            stages: Vec::new(),
            silent_reason,
            subtitle_path,
        })
    }
}

/// Fetch `key_frame_count` frames ordered by index and conform them to one canvas.
fn acquire_key_frames(
    config: &PipelineConfig,
    cancel: &CancelToken,
    prompt: &str,
    quality: Quality,
    supplier: &dyn KeyFrameSupplier,
) -> ReelResult<KeyFrameSet> {
    let count = config.key_frame_count;
    let fetch = |i: usize| -> ReelResult<Frame> {
        cancel.check()?;
        let frame = supplier.supply(&key_frame_prompt(prompt, i), i, quality)?;
        tracing::debug!(
            index = i,
            width = frame.width(),
            height = frame.height(),
            "key frame acquired"
        );
        Ok(frame)
    };
    let frames = if config.parallel_acquisition {
        (0..count)
            .into_par_iter()
            .map(fetch)
            .collect::<ReelResult<Vec<_>>>()?
    } else {
        (0..count).map(fetch).collect::<ReelResult<Vec<_>>>()?
    };

    let canvas = match config.canvas {
        Some(c) => c,
        None => {
            let first = frames
                .first()
                .ok_or_else(|| ReelError::acquisition("supplier produced no key frames"))?;
            even_canvas(first.canvas())?
        }
    };
    KeyFrameSet::conformed(frames, canvas)
}

/// Round a canvas down to even dimensions, as required by yuv420p.
pub(crate) fn even_canvas(c: Canvas) -> ReelResult<Canvas> {
    Canvas::new((c.width & !1).max(2), (c.height & !1).max(2))
}

struct StageTracker {
    current: Stage,
    visited: Vec<Stage>,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            current: Stage::Start,
            visited: vec![Stage::Start],
        }
    }

    /// Stage being entered; a failure is attributed to it.
    fn pending(&self) -> Stage {
        self.current.next().unwrap_or(Stage::Failed)
    }

    fn advance(&mut self) {
        if let Some(next) = self.current.next() {
            tracing::debug!(stage = %next, "stage reached");
            self.current = next;
            self.visited.push(next);
        }
    }
}

/// Uniquely named scratch directory owned by one run, removed on drop.
struct RunWorkDir {
    path: PathBuf,
}

impl RunWorkDir {
    fn create(parent: Option<&Path>) -> ReelResult<Self> {
        let parent = parent.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
        let path = parent.join(format!("reelsmith-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).map_err(|e| {
            ReelError::from(anyhow::anyhow!(
                "failed to create work dir '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunWorkDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove work dir");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
