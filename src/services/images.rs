use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Frame, Quality};
use crate::foundation::error::{ReelError, ReelResult};
use crate::services::openai::OpenAiClient;

/// Produces one key frame per call.
///
/// `index` is 0-based. Implementations must be `Sync` because key frames may be acquired in
/// parallel.
pub trait KeyFrameSupplier: Send + Sync {
    /// Produce the key frame for `prompt`.
    fn supply(&self, prompt: &str, index: usize, quality: Quality) -> ReelResult<Frame>;
}

impl<F> KeyFrameSupplier for F
where
    F: Fn(&str, usize, Quality) -> ReelResult<Frame> + Send + Sync,
{
    fn supply(&self, prompt: &str, index: usize, quality: Quality) -> ReelResult<Frame> {
        self(prompt, index, quality)
    }
}

/// Prompt for key frame `index` (0-based) derived from the run prompt.
pub fn key_frame_prompt(prompt: &str, index: usize) -> String {
    format!(
        "{prompt} Frame {}: With slight variation in perspective, lighting, or movement",
        index + 1
    )
}

/// Image-generation request parameters for a quality level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ImageRequest {
    pub(crate) model: &'static str,
    pub(crate) size: &'static str,
    pub(crate) quality: Option<&'static str>,
}

impl ImageRequest {
    pub(crate) fn for_quality(quality: Quality) -> Self {
        match quality {
            Quality::Draft => Self {
                model: "dall-e-2",
                size: "512x512",
                quality: None,
            },
            Quality::Standard => Self {
                model: "dall-e-3",
                size: "1024x1024",
                quality: Some("standard"),
            },
            Quality::High => Self {
                model: "dall-e-3",
                size: "1024x1024",
                quality: Some("hd"),
            },
        }
    }

    pub(crate) fn body(self, prompt: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "size": self.size,
            "n": 1,
        });
        if let Some(q) = self.quality {
            body["quality"] = serde_json::Value::from(q);
        }
        body
    }
}

/// Key frames from the `images/generations` endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiImageSupplier {
    client: Arc<OpenAiClient>,
}

impl OpenAiImageSupplier {
    /// Build a supplier over a shared client.
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

impl KeyFrameSupplier for OpenAiImageSupplier {
    #[tracing::instrument(skip(self, prompt), fields(quality = quality.name()))]
    fn supply(&self, prompt: &str, index: usize, quality: Quality) -> ReelResult<Frame> {
        let body = ImageRequest::for_quality(quality).body(prompt);
        let json = self
            .client
            .post_for_json("images/generations", &body)
            .map_err(|e| ReelError::acquisition(format!("key frame {index}: {e:#}")))?;
        let url = json["data"][0]["url"].as_str().ok_or_else(|| {
            ReelError::acquisition(format!("key frame {index}: response has no image url"))
        })?;
        let bytes = self
            .client
            .download(url)
            .map_err(|e| ReelError::acquisition(format!("key frame {index}: {e:#}")))?;
        Frame::decode(&bytes)
    }
}

/// Key frames from local image files, cycled by index.
#[derive(Clone, Debug)]
pub struct ImageFileSupplier {
    paths: Vec<PathBuf>,
}

impl ImageFileSupplier {
    /// Build a supplier; at least one path is required.
    pub fn new(paths: Vec<PathBuf>) -> ReelResult<Self> {
        if paths.is_empty() {
            return Err(ReelError::invalid_input(
                "image file supplier needs at least one path",
            ));
        }
        Ok(Self { paths })
    }

    /// Configured image paths.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn path_for(&self, index: usize) -> &Path {
        &self.paths[index % self.paths.len()]
    }
}

impl KeyFrameSupplier for ImageFileSupplier {
    fn supply(&self, _prompt: &str, index: usize, _quality: Quality) -> ReelResult<Frame> {
        let path = self.path_for(index);
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read key frame '{}'", path.display()))
            .map_err(|e| ReelError::acquisition(format!("{e:#}")))?;
        Frame::decode(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/images.rs"]
mod tests;
