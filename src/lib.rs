//! reelsmith turns a short text description into a captioned, narrated MP4.
//!
//! The core is deterministic: key frames are blended into a frame sequence of exactly
//! `round(duration * fps)` frames, a caption and watermark are burned in, and the result is
//! streamed into `ffmpeg` together with an optional narration track. Prompt enhancement, image
//! acquisition and speech synthesis sit behind traits:
//!
//! - [`PromptEnhancer`] rewrites the user prompt ([`OpenAiEnhancer`])
//! - [`KeyFrameSupplier`] produces still images ([`OpenAiImageSupplier`], [`ImageFileSupplier`])
//! - [`NarrationSynthesizer`] produces an audio asset ([`OpenAiSpeech`], [`DisabledNarration`])
//!
//! [`Pipeline`] sequences everything and reports failures as a [`PipelineFailure`] naming the
//! stage that failed.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod caption;
/// Encoding sinks.
pub mod encode;
pub(crate) mod narration;
pub(crate) mod pipeline;
pub(crate) mod sequence;
pub(crate) mod services;
pub(crate) mod video;

pub use crate::foundation::core::{Canvas, Frame, Quality, Vec2};
pub use crate::foundation::error::{
    PipelineFailure, ReelError, ReelResult, Stage, SynthesisFailure,
};

pub use crate::caption::compositor::{CaptionConfig, TextCompositor};
pub use crate::caption::font::{FONT_ENV_VAR, load_font_bytes, resolve_font_path};
pub use crate::caption::overlay::CaptionOverlay;
pub use crate::caption::wrap::wrap_words;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkFactory, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{
    AudioInputConfig, FrameSink, InMemorySink, InMemorySinkFactory, SinkConfig, SinkFactory,
};
pub use crate::narration::asset::{
    DisabledNarration, NarrationAsset, NarrationOutcome, NarrationSynthesizer, SubtitleCue,
    single_cue_track,
};
pub use crate::narration::probe::probe_duration_secs;
pub use crate::narration::srt::{compose_srt, format_timestamp, write_srt};
pub use crate::pipeline::cancel::CancelToken;
pub use crate::pipeline::config::{
    MAX_DURATION_SECS, MIN_DURATION_SECS, PipelineConfig, validate_duration,
};
pub use crate::pipeline::run::{Pipeline, RunReport};
pub use crate::sequence::interpolate::{
    FrameSequence, MAX_TOTAL_FRAMES, TransitionPlan, interpolate, total_frames,
};
pub use crate::sequence::keyframes::KeyFrameSet;
pub use crate::services::enhance::{
    OpenAiEnhancer, PromptEnhancer, enhance_or_fallback, load_style_guide,
};
pub use crate::services::images::{
    ImageFileSupplier, KeyFrameSupplier, OpenAiImageSupplier, key_frame_prompt,
};
pub use crate::services::openai::{
    API_KEY_ENV_VAR, BASE_URL_ENV_VAR, DEFAULT_BASE_URL, OpenAiClient, OpenAiConfig,
};
pub use crate::services::speech::OpenAiSpeech;
pub use crate::video::compositor::{VideoCompositor, VideoOutput};
