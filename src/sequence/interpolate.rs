use crate::foundation::core::{Canvas, Frame};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::lerp_channel_u8;
use crate::sequence::keyframes::KeyFrameSet;

/// Ordered frames of an exact, precomputed length.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    canvas: Canvas,
}

impl FrameSequence {
    pub(crate) fn from_frames(frames: Vec<Frame>, canvas: Canvas) -> Self {
        Self { frames, canvas }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Dimensions shared by every frame.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Borrow the frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Consume the sequence into its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Timing allocation for an interpolation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Exact output length.
    pub total_frames: u64,
    /// Number of key-frame transitions (`key_frames - 1`).
    pub transitions: u64,
    /// Frames allotted to each transition (floor division).
    pub frames_per_transition: u64,
    /// Trailing copies of the last key frame needed to reach `total_frames`.
    pub padding: u64,
}

/// Longest sequence `interpolate` builds (about 12 hours at 24 fps).
pub const MAX_TOTAL_FRAMES: u64 = 1 << 20;

/// Number of frames for `duration_secs` at `frame_rate`, rounded to the nearest frame.
///
/// Totals above [`MAX_TOTAL_FRAMES`] are rejected.
pub fn total_frames(duration_secs: f64, frame_rate: u32) -> ReelResult<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(ReelError::invalid_input(
            "duration_seconds must be finite and > 0",
        ));
    }
    if frame_rate == 0 {
        return Err(ReelError::invalid_input("frame_rate must be > 0"));
    }
    let total = (duration_secs * f64::from(frame_rate)).round();
    if total < 1.0 {
        return Err(ReelError::invalid_input(format!(
            "duration {duration_secs}s is shorter than one frame at {frame_rate} fps"
        )));
    }
    if total > MAX_TOTAL_FRAMES as f64 {
        return Err(ReelError::invalid_input(format!(
            "duration {duration_secs}s at {frame_rate} fps exceeds {MAX_TOTAL_FRAMES} frames"
        )));
    }
    Ok(total as u64)
}

impl TransitionPlan {
    /// Allocate `total_frames` across the transitions between `key_frames` frames.
    pub fn new(key_frames: usize, total_frames: u64) -> ReelResult<Self> {
        if key_frames == 0 {
            return Err(ReelError::invalid_input("key frame set must not be empty"));
        }
        let transitions = (key_frames as u64) - 1;
        let frames_per_transition = if transitions == 0 {
            0
        } else {
            total_frames / transitions
        };
        let blended = frames_per_transition * transitions;
        Ok(Self {
            total_frames,
            transitions,
            frames_per_transition,
            padding: total_frames - blended,
        })
    }
}

/// Expand `key_frames` into `round(duration_secs * frame_rate)` frames by linear blending.
///
/// Each transition A→B with `T` allotted frames contributes frames `j = 0..T` at `α = j / T`,
/// rounded half up per channel. The remainder of the floor division is filled with the last key
/// frame, so a single key frame yields that frame repeated. The final frame is always the last
/// key frame, even when the division leaves no remainder.
#[tracing::instrument(skip(key_frames), fields(key_frames = key_frames.len()))]
pub fn interpolate(
    key_frames: &KeyFrameSet,
    duration_secs: f64,
    frame_rate: u32,
) -> ReelResult<FrameSequence> {
    let total = total_frames(duration_secs, frame_rate)?;
    let plan = TransitionPlan::new(key_frames.len(), total)?;
    let canvas = key_frames.canvas();

    let mut frames = Vec::with_capacity(total as usize);
    let keys = key_frames.frames();
    for pair in keys.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        for j in 0..plan.frames_per_transition {
            frames.push(blend(a, b, j, plan.frames_per_transition)?);
        }
    }

    let last = key_frames.last();
    frames.extend(std::iter::repeat_n(last.clone(), plan.padding as usize));
    if let Some(end) = frames.last_mut()
        && !end.shares_pixels(last)
    {
        *end = last.clone();
    }

    tracing::debug!(
        total = plan.total_frames,
        per_transition = plan.frames_per_transition,
        padding = plan.padding,
        "interpolated frame sequence"
    );
    debug_assert_eq!(frames.len() as u64, plan.total_frames);
    Ok(FrameSequence::from_frames(frames, canvas))
}

/// Blend `a` toward `b` at step `j` of `t`. Step 0 reuses `a` without copying.
pub(crate) fn blend(a: &Frame, b: &Frame, j: u64, t: u64) -> ReelResult<Frame> {
    if a.canvas() != b.canvas() {
        return Err(ReelError::invalid_input("blend expects equal-size frames"));
    }
    if j == 0 {
        return Ok(a.clone());
    }
    let pixels = a
        .as_rgb8()
        .iter()
        .zip(b.as_rgb8())
        .map(|(&pa, &pb)| lerp_channel_u8(pa, pb, j, t))
        .collect::<Vec<u8>>();
    Frame::from_rgb8(a.width(), a.height(), pixels)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/interpolate.rs"]
mod tests;
