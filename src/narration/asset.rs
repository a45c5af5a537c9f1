use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::encode::sink::AudioInputConfig;
use crate::foundation::error::SynthesisFailure;

/// One subtitle entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtitleCue {
    /// 1-based cue number.
    pub index: u32,
    /// Offset from the start of the video.
    pub start: Duration,
    /// End offset (exclusive).
    pub end: Duration,
    /// Cue text.
    pub text: String,
}

/// Synthesized narration: an audio file of known duration plus its subtitle track.
#[derive(Clone, Debug, PartialEq)]
pub struct NarrationAsset {
    /// Encoded audio file.
    pub audio_path: PathBuf,
    /// Authoritative audio duration in seconds; never coerced to the video length.
    pub duration_secs: f64,
    /// Whether `audio_path` is a temporary file to delete after muxing.
    pub temporary: bool,
    /// Subtitle track in playback order.
    pub subtitles: Vec<SubtitleCue>,
}

impl NarrationAsset {
    /// Audio input description for the encoder.
    pub fn audio_input(&self) -> AudioInputConfig {
        AudioInputConfig {
            path: self.audio_path.clone(),
            duration_secs: self.duration_secs,
        }
    }

    /// Delete the audio file when it is temporary. Failures are logged, not returned.
    pub fn release(&self) {
        if !self.temporary {
            return;
        }
        match std::fs::remove_file(&self.audio_path) {
            Ok(()) => tracing::debug!(path = %self.audio_path.display(), "removed narration audio"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.audio_path.display(),
                error = %e,
                "failed to remove temporary narration audio"
            ),
        }
    }
}

/// A single cue covering `[0, duration)` with `text`.
pub fn single_cue_track(text: &str, duration_secs: f64) -> Vec<SubtitleCue> {
    let end = Duration::try_from_secs_f64(duration_secs.max(0.0)).unwrap_or(Duration::ZERO);
    vec![SubtitleCue {
        index: 1,
        start: Duration::ZERO,
        end,
        text: text.trim().to_string(),
    }]
}

/// Converts narration text into an audio asset.
///
/// `workdir` is owned by the calling run; implementations write temporary files there so
/// concurrent runs never share a path.
pub trait NarrationSynthesizer: Send + Sync {
    /// Synthesize `text` intended to cover roughly `duration_secs`.
    fn synthesize(
        &self,
        text: &str,
        duration_secs: f64,
        workdir: &Path,
    ) -> Result<NarrationAsset, SynthesisFailure>;
}

/// Synthesizer that never produces audio. Runs using it are always silent.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledNarration;

impl NarrationSynthesizer for DisabledNarration {
    fn synthesize(
        &self,
        _text: &str,
        _duration_secs: f64,
        _workdir: &Path,
    ) -> Result<NarrationAsset, SynthesisFailure> {
        Err(SynthesisFailure::new("narration disabled"))
    }
}

/// Result of the narration stage.
#[derive(Clone, Debug, PartialEq)]
pub enum NarrationOutcome {
    /// Audio is available and will be muxed.
    Narrated(NarrationAsset),
    /// Synthesis failed; the video is produced without an audio track.
    Silent {
        /// Why narration is missing.
        reason: String,
    },
}

impl NarrationOutcome {
    /// Borrow the asset when narration is available.
    pub fn asset(&self) -> Option<&NarrationAsset> {
        match self {
            Self::Narrated(a) => Some(a),
            Self::Silent { .. } => None,
        }
    }
}

impl From<Result<NarrationAsset, SynthesisFailure>> for NarrationOutcome {
    fn from(value: Result<NarrationAsset, SynthesisFailure>) -> Self {
        match value {
            Ok(asset) => Self::Narrated(asset),
            Err(e) => Self::Silent { reason: e.reason },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narration/asset.rs"]
mod tests;
