use crate::caption::layout::TextBlock;
use crate::foundation::core::{Canvas, Frame, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u16;
use crate::pipeline::cancel::CancelToken;

/// Diagonal offsets of the outline pass, in pixels (scaled by the outline width).
const OUTLINE_OFFSETS: [(f64, f64); 4] = [(1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0)];

/// How a text block is positioned relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Block centre sits on the anchor.
    CenterMiddle,
    /// Block bottom-right corner sits on the anchor.
    RightBottom,
}

/// A text block placed on the canvas with its paint colors.
pub(crate) struct OutlinedText<'a> {
    pub(crate) block: &'a TextBlock,
    /// Anchor position as fractions of the canvas size.
    pub(crate) at: Vec2,
    pub(crate) anchor: Anchor,
    pub(crate) fill: [u8; 4],
    pub(crate) outline: [u8; 4],
    pub(crate) outline_px: f32,
}

impl OutlinedText<'_> {
    fn origin(&self, canvas: Canvas) -> (f64, f64) {
        let ax = self.at.x * f64::from(canvas.width);
        let ay = self.at.y * f64::from(canvas.height);
        let (w, h) = (f64::from(self.block.width), f64::from(self.block.height));
        let (x, y) = match self.anchor {
            Anchor::CenterMiddle => (ax - w * 0.5, ay - h * 0.5),
            Anchor::RightBottom => (ax - w, ay - h),
        };
        (x.round(), y.round())
    }
}

/// Caption layer rasterized once per canvas and composited over every frame.
///
/// Pixels are premultiplied RGBA8, row-major, covering the whole canvas.
#[derive(Clone, Debug)]
pub struct CaptionOverlay {
    canvas: Canvas,
    rgba_premul: Vec<u8>,
    lines: Vec<String>,
}

impl CaptionOverlay {
    pub(crate) fn rasterize(
        canvas: Canvas,
        font: &vello_cpu::peniko::FontData,
        items: &[OutlinedText<'_>],
        lines: Vec<String>,
    ) -> ReelResult<Self> {
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ReelError::render("caption canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ReelError::render("caption canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        if items.iter().any(|t| !t.block.is_empty()) {
            let mut ctx = vello_cpu::RenderContext::new(w, h);
            for item in items.iter().filter(|t| !t.block.is_empty()) {
                let (x, y) = item.origin(canvas);
                let d = f64::from(item.outline_px);
                for (ox, oy) in OUTLINE_OFFSETS {
                    draw_block(&mut ctx, font, item.block, x + ox * d, y + oy * d, item.outline);
                }
                draw_block(&mut ctx, font, item.block, x, y, item.fill);
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        }

        Ok(Self {
            canvas,
            rgba_premul: pixmap.data_as_u8_slice().to_vec(),
            lines,
        })
    }

    /// Canvas this overlay was rendered for.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Wrapped caption lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Return `true` when the overlay has no visible pixels.
    pub fn is_blank(&self) -> bool {
        self.rgba_premul.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Alpha coverage at `(x, y)`.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = (y as usize * self.canvas.width as usize + x as usize) * 4 + 3;
        Some(self.rgba_premul[i])
    }

    /// Composite the overlay over `frame` ("over" operator, opaque destination).
    pub fn apply(&self, frame: &Frame) -> ReelResult<Frame> {
        if frame.canvas() != self.canvas {
            return Err(ReelError::invalid_input(format!(
                "frame is {}x{}, caption overlay is {}x{}",
                frame.width(),
                frame.height(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        let mut out = frame.as_rgb8().to_vec();
        for (d, s) in out.chunks_exact_mut(3).zip(self.rgba_premul.chunks_exact(4)) {
            let a = u16::from(s[3]);
            if a == 0 {
                continue;
            }
            let inv = 255 - a;
            for c in 0..3 {
                let v = u16::from(s[c]) + mul_div255_u16(u16::from(d[c]), inv);
                d[c] = v.min(255) as u8;
            }
        }
        Frame::from_rgb8(frame.width(), frame.height(), out)
    }

    /// Replace every frame in `frames` with its captioned version.
    ///
    /// Each slot drops its uncaptioned buffer as soon as it is replaced. A run of frames sharing
    /// one buffer is composited once and keeps sharing the captioned buffer.
    pub fn apply_in_place(&self, frames: &mut [Frame], cancel: &CancelToken) -> ReelResult<()> {
        let mut previous: Option<(Frame, Frame)> = None;
        for slot in frames.iter_mut() {
            cancel.check()?;
            let captioned = match &previous {
                Some((src, out)) if src.shares_pixels(slot) => out.clone(),
                _ => self.apply(slot)?,
            };
            let src = std::mem::replace(slot, captioned.clone());
            previous = Some((src, captioned));
        }
        Ok(())
    }
}

fn draw_block(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    block: &TextBlock,
    x: f64,
    y: f64,
    rgba: [u8; 4],
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        rgba[0], rgba[1], rgba[2], rgba[3],
    ));
    for run in &block.runs {
        let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(font)
            .font_size(run.font_size)
            .fill_glyphs(glyphs);
    }
}
