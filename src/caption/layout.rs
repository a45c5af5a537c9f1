use std::borrow::Cow;

use crate::foundation::error::{ReelError, ReelResult};

/// A glyph positioned relative to the top-left corner of its text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Glyphs that share one font size.
#[derive(Clone, Debug)]
pub(crate) struct PlacedRun {
    pub(crate) font_size: f32,
    pub(crate) glyphs: Vec<PlacedGlyph>,
}

/// Shaped, centre-aligned multi-line text and its bounding box.
#[derive(Clone, Debug, Default)]
pub(crate) struct TextBlock {
    pub(crate) runs: Vec<PlacedRun>,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl TextBlock {
    pub(crate) fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.glyphs.is_empty())
    }
}

/// Parley layout for a single registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and keep its family for every later layout.
    pub(crate) fn new(font_bytes: &[u8]) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ReelError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape `lines` (already wrapped) and centre each line within the block width.
    pub(crate) fn layout_lines(&mut self, lines: &[String], size_px: f32) -> ReelResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::invalid_input(
                "caption font size must be finite and > 0",
            ));
        }
        if lines.is_empty() {
            return Ok(TextBlock::default());
        }

        let text = lines.join("\n");
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(&text);
        layout.break_all_lines(None);

        let width = layout.width();
        let mut runs = Vec::new();
        for line in layout.lines() {
            let metrics = line.metrics();
            let visible = metrics.advance - metrics.trailing_whitespace;
            let dx = ((width - visible) * 0.5).max(0.0);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .glyphs()
                    .map(|g| PlacedGlyph {
                        id: g.id,
                        x: g.x + dx,
                        y: g.y,
                    })
                    .collect();
                runs.push(PlacedRun {
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        Ok(TextBlock {
            runs,
            width,
            height: layout.height(),
        })
    }
}
