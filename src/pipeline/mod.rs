//! The orchestrator: prompt -> key frames -> sequence -> captions -> narration -> video.

pub(crate) mod cancel;
pub(crate) mod config;
pub(crate) mod run;
