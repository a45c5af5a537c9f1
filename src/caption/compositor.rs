use std::path::PathBuf;

use crate::caption::font::load_font_bytes;
use crate::caption::layout::TextLayoutEngine;
use crate::caption::overlay::{Anchor, CaptionOverlay, OutlinedText};
use crate::caption::wrap::wrap_words;
use crate::foundation::core::{Canvas, Frame, Vec2};
use crate::foundation::error::{ReelError, ReelResult};

/// Caption and watermark styling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Greedy wrap threshold, in characters per line.
    pub max_line_chars: usize,
    /// Watermark text; `None` or empty disables the watermark.
    pub watermark: Option<String>,
    /// Font file. `None` searches `REELSMITH_FONT` and common system fonts.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels. `None` derives it from the frame height.
    pub font_size_px: Option<f32>,
    /// Fill color (straight RGBA8).
    pub fill_rgba: [u8; 4],
    /// Outline color (straight RGBA8).
    pub outline_rgba: [u8; 4],
    /// Distance of the four diagonal outline passes, in pixels.
    pub outline_px: f32,
    /// Caption block centre, as fractions of width/height.
    pub caption_anchor: Vec2,
    /// Watermark bottom-right corner, as fractions of width/height.
    pub watermark_anchor: Vec2,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_line_chars: 40,
            watermark: Some("reelsmith".to_string()),
            font_path: None,
            font_size_px: None,
            fill_rgba: [255, 255, 255, 255],
            outline_rgba: [0, 0, 0, 255],
            outline_px: 1.0,
            caption_anchor: Vec2::new(0.5, 0.85),
            watermark_anchor: Vec2::new(0.95, 0.95),
        }
    }
}

impl CaptionConfig {
    /// Check thresholds, sizes and anchors.
    pub fn validate(&self) -> ReelResult<()> {
        if self.max_line_chars == 0 {
            return Err(ReelError::invalid_input("caption max_line_chars must be > 0"));
        }
        if let Some(size) = self.font_size_px
            && (!size.is_finite() || size <= 0.0)
        {
            return Err(ReelError::invalid_input(
                "caption font_size_px must be finite and > 0",
            ));
        }
        if !self.outline_px.is_finite() || self.outline_px < 0.0 {
            return Err(ReelError::invalid_input("caption outline_px must be >= 0"));
        }
        for (name, a) in [
            ("caption_anchor", self.caption_anchor),
            ("watermark_anchor", self.watermark_anchor),
        ] {
            if !(0.0..=1.0).contains(&a.x) || !(0.0..=1.0).contains(&a.y) {
                return Err(ReelError::invalid_input(format!(
                    "{name} must lie within [0, 1] x [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Font size used for a canvas of `height` pixels.
    pub fn font_size_for(&self, height: u32) -> f32 {
        self.font_size_px
            .unwrap_or_else(|| (height as f32 * 0.045).max(10.0))
    }

    fn watermark_text(&self) -> Option<&str> {
        self.watermark
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Burns a wrapped, outlined caption and an optional watermark into frames.
pub struct TextCompositor {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    config: CaptionConfig,
}

impl TextCompositor {
    /// Build a compositor, resolving the font from `config`.
    pub fn new(config: CaptionConfig) -> ReelResult<Self> {
        let bytes = load_font_bytes(config.font_path.as_deref())?;
        Self::from_font_bytes(bytes, config)
    }

    /// Build a compositor from in-memory font data.
    pub fn from_font_bytes(font_bytes: Vec<u8>, config: CaptionConfig) -> ReelResult<Self> {
        config.validate()?;
        let engine = TextLayoutEngine::new(&font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            engine,
            font,
            config,
        })
    }

    /// Styling in use.
    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Rasterize the caption layer for `canvas` once.
    #[tracing::instrument(skip(self, caption_text))]
    pub fn prepare(
        &mut self,
        canvas: Canvas,
        caption_text: &str,
        watermark_enabled: bool,
    ) -> ReelResult<CaptionOverlay> {
        let size = self.config.font_size_for(canvas.height);
        let lines = wrap_words(caption_text, self.config.max_line_chars);
        let caption = self.engine.layout_lines(&lines, size)?;

        let watermark = match self.config.watermark_text() {
            Some(text) if watermark_enabled => {
                Some(self.engine.layout_lines(&[text.to_string()], size)?)
            }
            _ => None,
        };

        let mut items = vec![OutlinedText {
            block: &caption,
            at: self.config.caption_anchor,
            anchor: Anchor::CenterMiddle,
            fill: self.config.fill_rgba,
            outline: self.config.outline_rgba,
            outline_px: self.config.outline_px,
        }];
        if let Some(block) = watermark.as_ref() {
            items.push(OutlinedText {
                block,
                at: self.config.watermark_anchor,
                anchor: Anchor::RightBottom,
                fill: self.config.fill_rgba,
                outline: self.config.outline_rgba,
                outline_px: self.config.outline_px,
            });
        }

        tracing::debug!(lines = lines.len(), font_size = size, "rasterizing caption layer");
        CaptionOverlay::rasterize(canvas, &self.font, &items, lines)
    }

    /// Return a copy of `frame` with the caption (and watermark, when enabled) burned in.
    pub fn compose(
        &mut self,
        frame: &Frame,
        caption_text: &str,
        watermark_enabled: bool,
    ) -> ReelResult<Frame> {
        let overlay = self.prepare(frame.canvas(), caption_text, watermark_enabled)?;
        overlay.apply(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/compositor.rs"]
mod tests;
