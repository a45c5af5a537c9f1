use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        frame_rate: 24,
        audio: None,
    }
}

#[test]
fn factory_clones_share_one_recording() {
    let factory = InMemorySinkFactory::new();
    let handle = factory.clone();
    let frame = Frame::solid(4, 2, [9, 8, 7]).unwrap();

    let mut sink = factory.open(Path::new("out/a.mp4")).unwrap();
    sink.begin(cfg()).unwrap();
    for idx in 0..3 {
        sink.push_frame(idx, &frame).unwrap();
    }
    sink.end().unwrap();

    handle.with_sink(|s| {
        assert_eq!(s.config(), Some(&cfg()));
        assert_eq!(s.frames().len(), 3);
        assert!(s.frames()[2].1.shares_pixels(&frame));
        assert!(s.is_finished());
    });
    assert_eq!(handle.opened_paths(), vec![PathBuf::from("out/a.mp4")]);
}

#[test]
fn begin_starts_a_fresh_recording() {
    let mut sink = InMemorySink::new();
    let frame = Frame::solid(4, 2, [0; 3]).unwrap();
    sink.begin(cfg()).unwrap();
    sink.push_frame(0, &frame).unwrap();
    sink.end().unwrap();

    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
}

#[test]
fn out_of_order_or_unframed_pushes_are_rejected() {
    let frame = Frame::solid(4, 2, [0; 3]).unwrap();
    let mut sink = InMemorySink::new();
    assert!(matches!(sink.push_frame(0, &frame), Err(ReelError::Encoding(_))));

    sink.begin(cfg()).unwrap();
    sink.push_frame(0, &frame).unwrap();
    sink.push_frame(1, &frame).unwrap();
    assert!(matches!(sink.push_frame(1, &frame), Err(ReelError::Encoding(_))));

    sink.end().unwrap();
    assert!(matches!(sink.push_frame(2, &frame), Err(ReelError::Encoding(_))));
    assert_eq!(sink.frames().len(), 2);
}
