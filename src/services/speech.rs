use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::SynthesisFailure;
use crate::narration::asset::{NarrationAsset, NarrationSynthesizer, single_cue_track};
use crate::narration::probe::probe_duration_secs;
use crate::services::openai::OpenAiClient;

/// Narration from the `audio/speech` endpoint, saved as mp3 inside the run work directory.
#[derive(Clone, Debug)]
pub struct OpenAiSpeech {
    client: Arc<OpenAiClient>,
}

impl OpenAiSpeech {
    /// File name of the synthesized audio inside the work directory.
    pub const AUDIO_FILE_NAME: &'static str = "narration.mp3";

    /// Build a synthesizer over a shared client.
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn request_body(&self, text: &str) -> serde_json::Value {
        let cfg = self.client.config();
        serde_json::json!({
            "model": cfg.speech_model,
            "voice": cfg.speech_voice,
            "input": text,
            "response_format": "mp3",
        })
    }
}

impl NarrationSynthesizer for OpenAiSpeech {
    #[tracing::instrument(skip(self, text, workdir))]
    fn synthesize(
        &self,
        text: &str,
        duration_secs: f64,
        workdir: &Path,
    ) -> Result<NarrationAsset, SynthesisFailure> {
        if text.trim().is_empty() {
            return Err(SynthesisFailure::new("narration text is empty"));
        }
        let resp = self
            .client
            .post_json("audio/speech", &self.request_body(text))
            .map_err(|e| SynthesisFailure::new(format!("{e:#}")))?;
        let audio = resp
            .bytes()
            .map_err(|e| SynthesisFailure::new(format!("failed to read speech audio: {e}")))?;
        if audio.is_empty() {
            return Err(SynthesisFailure::new("speech endpoint returned no audio"));
        }

        std::fs::create_dir_all(workdir)
            .map_err(|e| SynthesisFailure::new(format!("failed to create work dir: {e}")))?;
        let audio_path = workdir.join(Self::AUDIO_FILE_NAME);
        std::fs::write(&audio_path, &audio)
            .map_err(|e| SynthesisFailure::new(format!("failed to write speech audio: {e}")))?;

        let audio_secs = match probe_duration_secs(&audio_path) {
            Ok(secs) => secs,
            Err(e) => {
                tracing::warn!(error = %e, "could not probe narration length; using requested duration");
                duration_secs
            }
        };

        Ok(NarrationAsset {
            audio_path,
            duration_secs: audio_secs,
            temporary: true,
            subtitles: single_cue_track(text, duration_secs),
        })
    }
}
