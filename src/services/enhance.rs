use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{ReelError, ReelResult};
use crate::services::openai::OpenAiClient;

/// Expands a terse user description into a richer visual description.
pub trait PromptEnhancer: Send + Sync {
    /// Enhance `user_text` following `style_guide` (possibly empty).
    fn enhance(&self, user_text: &str, style_guide: &str) -> ReelResult<String>;
}

impl<F> PromptEnhancer for F
where
    F: Fn(&str, &str) -> ReelResult<String> + Send + Sync,
{
    fn enhance(&self, user_text: &str, style_guide: &str) -> ReelResult<String> {
        self(user_text, style_guide)
    }
}

/// Read the style guide at `path`, or an empty guide when the file does not exist.
pub fn load_style_guide(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to read style guide");
            }
            String::new()
        }
    }
}

/// Enhance `user_text`, falling back to it verbatim on any failure or empty result.
pub fn enhance_or_fallback(
    enhancer: &dyn PromptEnhancer,
    user_text: &str,
    style_guide: &str,
) -> String {
    match enhancer.enhance(user_text, style_guide) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!("prompt enhancement returned empty text; using the original prompt");
            user_text.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "prompt enhancement failed; using the original prompt");
            user_text.to_string()
        }
    }
}

pub(crate) fn system_prompt(style_guide: &str) -> String {
    format!(
        "You are a video description expert. Use these video creation guidelines:\n\
         {}\n\n\
         Generate a detailed, visual description that will work well for AI video generation.\n\
         Focus on visual elements, movement, and atmosphere.",
        style_guide.trim()
    )
}

/// Chat-completions prompt enhancer.
#[derive(Clone, Debug)]
pub struct OpenAiEnhancer {
    client: Arc<OpenAiClient>,
}

impl OpenAiEnhancer {
    /// Sampling temperature.
    pub const TEMPERATURE: f64 = 0.7;
    /// Completion length cap.
    pub const MAX_TOKENS: u32 = 300;

    /// Build an enhancer over a shared client.
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn request_body(&self, user_text: &str, style_guide: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.client.config().chat_model,
            "messages": [
                { "role": "system", "content": system_prompt(style_guide) },
                { "role": "user", "content": format!("Enhance this video description: {user_text}") }
            ],
            "temperature": Self::TEMPERATURE,
            "max_tokens": Self::MAX_TOKENS
        })
    }
}

impl PromptEnhancer for OpenAiEnhancer {
    #[tracing::instrument(skip_all)]
    fn enhance(&self, user_text: &str, style_guide: &str) -> ReelResult<String> {
        let body = self.request_body(user_text, style_guide);
        let json = self
            .client
            .post_for_json("chat/completions", &body)
            .map_err(|e| ReelError::acquisition(format!("prompt enhancement: {e:#}")))?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ReelError::acquisition("chat completion has no message content"))?;
        Ok(content.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/enhance.rs"]
mod tests;
