use std::fmt;

/// Convenience result type used across reelsmith.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by core operations and adapters.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Malformed arguments to a core operation (empty key frames, non-positive duration, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// External image or prompt service failure.
    #[error("acquisition failure: {0}")]
    Acquisition(String),

    /// External narration failure. Recoverable inside the pipeline.
    #[error("synthesis failure: {0}")]
    Synthesis(String),

    /// Muxing or writing the output file failed.
    #[error("encoding failure: {0}")]
    Encoding(String),

    /// Font or rasterization resources are unavailable.
    #[error("render error: {0}")]
    Render(String),

    /// The caller cancelled the run.
    #[error("run cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`ReelError::Acquisition`] value.
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    /// Build a [`ReelError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`ReelError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

/// Recoverable narration failure returned by [`crate::NarrationSynthesizer`] implementations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("narration unavailable: {reason}")]
pub struct SynthesisFailure {
    /// Human-readable cause.
    pub reason: String,
}

impl SynthesisFailure {
    /// Build a failure from any message.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<SynthesisFailure> for ReelError {
    fn from(value: SynthesisFailure) -> Self {
        Self::Synthesis(value.reason)
    }
}

/// Pipeline stages, in the only order a run may visit them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Run created, nothing done yet.
    Start,
    /// Prompt enhanced (or the user text accepted verbatim).
    PromptReady,
    /// All key frames acquired.
    KeyFramesAcquired,
    /// Full frame sequence interpolated.
    SequenceInterpolated,
    /// Caption and watermark burned into every frame.
    Captioned,
    /// Narration synthesized or skipped.
    NarrationAttempted,
    /// Output file encoded.
    Encoded,
    /// Run finished successfully.
    Done,
    /// Run aborted.
    Failed,
}

impl Stage {
    /// Stable snake_case name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::PromptReady => "prompt_ready",
            Self::KeyFramesAcquired => "key_frames_acquired",
            Self::SequenceInterpolated => "sequence_interpolated",
            Self::Captioned => "captioned",
            Self::NarrationAttempted => "narration_attempted",
            Self::Encoded => "encoded",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// The stage that follows `self` on the success path, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::PromptReady),
            Self::PromptReady => Some(Self::KeyFramesAcquired),
            Self::KeyFramesAcquired => Some(Self::SequenceInterpolated),
            Self::SequenceInterpolated => Some(Self::Captioned),
            Self::Captioned => Some(Self::NarrationAttempted),
            Self::NarrationAttempted => Some(Self::Encoded),
            Self::Encoded => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single externally visible error of a pipeline run.
#[derive(thiserror::Error, Debug)]
#[error("video generation failed at stage '{stage}': {source}")]
pub struct PipelineFailure {
    /// Stage that was being entered when the failure happened.
    pub stage: Stage,
    /// Underlying cause.
    #[source]
    pub source: ReelError,
}

impl PipelineFailure {
    /// Wrap `source` as a failure of `stage`.
    pub fn new(stage: Stage, source: ReelError) -> Self {
        Self { stage, source }
    }

    /// Return `true` when the run stopped because of a cancellation request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.source, ReelError::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
