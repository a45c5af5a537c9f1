use super::*;
use crate::encode::sink::InMemorySinkFactory;
use crate::narration::asset::single_cue_track;

/// Writes a stub file on `begin`, then fails on the given frame.
struct FailingFactory {
    fail_at: u64,
}

struct FailingSink {
    path: PathBuf,
    fail_at: u64,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        std::fs::write(&self.path, b"partial").map_err(anyhow::Error::from)?;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, _frame: &Frame) -> ReelResult<()> {
        if idx == self.fail_at {
            return Err(ReelError::encoding("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

impl SinkFactory for FailingFactory {
    fn open(&self, out_path: &Path) -> ReelResult<Box<dyn FrameSink>> {
        Ok(Box::new(FailingSink {
            path: out_path.to_path_buf(),
            fail_at: self.fail_at,
        }))
    }
}

fn frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame::solid(4, 4, [i as u8, 0, 0]).unwrap())
        .collect()
}

#[test]
fn silent_compose_streams_all_frames_in_order() {
    let factory = InMemorySinkFactory::new();
    let comp = VideoCompositor::new(Arc::new(factory.clone()));
    let input = frames(5);
    let out = comp
        .compose(&input, 24, None, Path::new("out.mp4"), &CancelToken::new())
        .unwrap();

    assert_eq!(out.frame_count, 5);
    assert!(!out.has_audio);
    assert_eq!(factory.opened_paths(), vec![PathBuf::from("out.mp4")]);
    factory.with_sink(|sink| {
        let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(sink.frames()[3].1.shares_pixels(&input[3]));
        assert!(sink.is_finished());
        let cfg = sink.config().unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.frame_rate), (4, 4, 24));
        assert!(cfg.audio.is_none());
    });
}

#[test]
fn narrated_compose_passes_audio_and_releases_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("narration.mp3");
    std::fs::write(&audio, b"mp3").unwrap();
    let asset = NarrationAsset {
        audio_path: audio.clone(),
        duration_secs: 12.5,
        temporary: true,
        subtitles: single_cue_track("hi", 2.0),
    };

    let factory = InMemorySinkFactory::new();
    let comp = VideoCompositor::new(Arc::new(factory.clone()));
    let out = comp
        .compose(
            &frames(48),
            24,
            Some(&asset),
            &dir.path().join("v.mp4"),
            &CancelToken::new(),
        )
        .unwrap();

    assert!(out.has_audio);
    assert_eq!(out.video_duration_secs(), 2.0);
    factory.with_sink(|sink| {
        let audio_cfg = sink.config().unwrap().audio.as_ref().unwrap();
        assert_eq!(audio_cfg.path, audio);
        assert_eq!(audio_cfg.duration_secs, 12.5);
    });
    assert!(!audio.exists());
}

#[test]
fn failed_encode_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("broken.mp4");
    let comp = VideoCompositor::new(Arc::new(FailingFactory { fail_at: 2 }));
    let err = comp
        .compose(&frames(4), 24, None, &out_path, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, ReelError::Encoding(_)));
    assert!(!out_path.exists());
}

#[test]
fn cancelled_compose_pushes_nothing() {
    let factory = InMemorySinkFactory::new();
    let comp = VideoCompositor::new(Arc::new(factory.clone()));
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = comp
        .compose(&frames(3), 24, None, Path::new("x.mp4"), &cancel)
        .unwrap_err();
    assert!(matches!(err, ReelError::Cancelled));
    assert!(factory.opened_paths().is_empty());
    factory.with_sink(|sink| assert!(sink.frames().is_empty()));
}

#[test]
fn rejects_empty_and_mixed_sequences() {
    let comp = VideoCompositor::new(Arc::new(InMemorySinkFactory::new()));
    let cancel = CancelToken::new();
    assert!(matches!(
        comp.compose(&[], 24, None, Path::new("x.mp4"), &cancel),
        Err(ReelError::InvalidInput(_))
    ));
    let mixed = vec![
        Frame::solid(4, 4, [0; 3]).unwrap(),
        Frame::solid(2, 2, [0; 3]).unwrap(),
    ];
    assert!(matches!(
        comp.compose(&mixed, 24, None, Path::new("x.mp4"), &cancel),
        Err(ReelError::InvalidInput(_))
    ));
}
