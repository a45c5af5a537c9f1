use std::sync::Arc;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::Vec2;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::invalid_input("canvas width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGB8 raster of this size.
    pub fn rgb8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(3)
    }
}

/// An immutable RGB8 raster.
///
/// Pixel storage is reference counted: cloning a `Frame` never copies pixels, which keeps padded
/// sequences (the same key frame repeated many times) cheap. Every transform returns a new frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Frame {
    /// Wrap tightly packed, row-major RGB8 bytes.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> ReelResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if pixels.len() != canvas.rgb8_len() {
            return Err(ReelError::invalid_input(format!(
                "frame byte length {} does not match {}x{} rgb8",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// A frame filled with a single color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> ReelResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let mut pixels = Vec::with_capacity(canvas.rgb8_len());
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&rgb);
        }
        Self::from_rgb8(width, height, pixels)
    }

    /// Convert a decoded image into a frame, dropping any alpha channel.
    pub fn from_image(img: image::DynamicImage) -> ReelResult<Self> {
        let rgb = img.into_rgb8();
        let (w, h) = rgb.dimensions();
        Self::from_rgb8(w, h, rgb.into_raw())
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) into a frame.
    pub fn decode(bytes: &[u8]) -> ReelResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| ReelError::acquisition(format!("image decode failed: {e}")))?;
        Self::from_image(img)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the raw RGB8 bytes.
    pub fn as_rgb8(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Return `true` when both frames share the same pixel allocation.
    pub fn shares_pixels(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Copy into an `image::RgbImage` (for saving or resampling).
    pub fn to_rgb_image(&self) -> ReelResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.to_vec())
            .ok_or_else(|| ReelError::invalid_input("frame buffer does not match its dimensions"))
    }

    /// Resample to `canvas`. Returns a cheap clone when the size already matches.
    pub fn resized(&self, canvas: Canvas) -> ReelResult<Self> {
        if canvas == self.canvas() {
            return Ok(self.clone());
        }
        Canvas::new(canvas.width, canvas.height)?;
        let src = self.to_rgb_image()?;
        let out = image::imageops::resize(
            &src,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
        Self::from_rgb8(canvas.width, canvas.height, out.into_raw())
    }
}

/// Requested image quality. Only key-frame suppliers look at it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Fast, low-resolution images.
    Draft,
    /// Default quality.
    #[default]
    Standard,
    /// Highest quality the supplier offers.
    High,
}

impl Quality {
    /// Lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Standard => "standard",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "standard" => Ok(Self::Standard),
            "high" => Ok(Self::High),
            other => Err(ReelError::invalid_input(format!(
                "unknown quality '{other}' (expected draft, standard or high)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
