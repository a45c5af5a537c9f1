use crate::foundation::core::Frame;
use crate::foundation::error::{ReelError, ReelResult};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub frame_rate: u32,
    /// Optional encoded audio file muxed as the single audio track.
    pub audio: Option<AudioInputConfig>,
}

/// Encoded audio input (any format `ffmpeg` can demux, e.g. mp3 or wav).
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInputConfig {
    /// Path to the audio file.
    pub path: PathBuf,
    /// Authoritative duration of the audio in seconds.
    pub duration_secs: f64,
}

/// Sink contract for consuming frames in playback order.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &Frame) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// Creates the sink that writes a run's output file.
pub trait SinkFactory: Send + Sync {
    /// Open a sink targeting `out_path`.
    fn open(&self, out_path: &Path) -> ReelResult<Box<dyn FrameSink>>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Frame)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, Frame)] {
        &self.frames
    }

    /// Return `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &Frame) -> ReelResult<()> {
        if self.cfg.is_none() || self.finished {
            return Err(ReelError::encoding("frame pushed outside begin/end"));
        }
        if let Some((prev, _)) = self.frames.last()
            && idx <= *prev
        {
            return Err(ReelError::encoding(format!(
                "frame index {idx} follows {prev}; indices must increase"
            )));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// [`SinkFactory`] whose sinks all record into one shared [`InMemorySink`].
///
/// Clones share the recording, so a clone handed to a compositor can be inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemorySinkFactory {
    sink: Arc<Mutex<InMemorySink>>,
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl InMemorySinkFactory {
    /// Create a factory with an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the recording.
    pub fn with_sink<R>(&self, f: impl FnOnce(&InMemorySink) -> R) -> R {
        f(&lock(&self.sink))
    }

    /// Output paths passed to `open`, in call order.
    pub fn opened_paths(&self) -> Vec<PathBuf> {
        lock(&self.opened).clone()
    }
}

impl SinkFactory for InMemorySinkFactory {
    fn open(&self, out_path: &Path) -> ReelResult<Box<dyn FrameSink>> {
        lock(&self.opened).push(out_path.to_path_buf());
        Ok(Box::new(SharedSink(Arc::clone(&self.sink))))
    }
}

struct SharedSink(Arc<Mutex<InMemorySink>>);

impl FrameSink for SharedSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        lock(&self.0).begin(cfg)
    }

    fn push_frame(&mut self, idx: u64, frame: &Frame) -> ReelResult<()> {
        lock(&self.0).push_frame(idx, frame)
    }

    fn end(&mut self) -> ReelResult<()> {
        lock(&self.0).end()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
