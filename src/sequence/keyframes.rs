use crate::foundation::core::{Canvas, Frame};
use crate::foundation::error::{ReelError, ReelResult};

/// Ordered, non-empty set of key frames with identical dimensions.
///
/// Order is the interpolation path: frame `i` blends into frame `i + 1`.
#[derive(Clone, Debug)]
pub struct KeyFrameSet {
    frames: Vec<Frame>,
    canvas: Canvas,
}

impl KeyFrameSet {
    /// Validate and wrap `frames`.
    pub fn new(frames: Vec<Frame>) -> ReelResult<Self> {
        let first = frames
            .first()
            .ok_or_else(|| ReelError::invalid_input("key frame set must not be empty"))?;
        let canvas = first.canvas();
        if let Some((i, f)) = frames.iter().enumerate().find(|(_, f)| f.canvas() != canvas) {
            return Err(ReelError::invalid_input(format!(
                "key frame {i} is {}x{}, expected {}x{}",
                f.width(),
                f.height(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self { frames, canvas })
    }

    /// Build a set after resampling every frame to `canvas`.
    pub fn conformed(frames: Vec<Frame>, canvas: Canvas) -> ReelResult<Self> {
        let frames = frames
            .iter()
            .map(|f| f.resized(canvas))
            .collect::<ReelResult<Vec<_>>>()?;
        Self::new(frames)
    }

    /// Shared dimensions of every key frame.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of key frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Borrow the key frames in path order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Last key frame (used for padding).
    pub fn last(&self) -> &Frame {
        // Non-empty by construction.
        &self.frames[self.frames.len() - 1]
    }
}
