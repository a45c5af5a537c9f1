use super::*;
use crate::narration::asset::single_cue_track;

#[test]
fn timestamps_use_srt_layout() {
    assert_eq!(format_timestamp(Duration::ZERO), "00:00:00,000");
    assert_eq!(format_timestamp(Duration::from_millis(10_500)), "00:00:10,500");
    assert_eq!(
        format_timestamp(Duration::from_secs(3_723) + Duration::from_millis(4)),
        "01:02:03,004"
    );
}

#[test]
fn single_cue_track_composes_to_srt() {
    let cues = single_cue_track("A fox runs through snow ", 10.0);
    let srt = compose_srt(&cues);
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:10,000\nA fox runs through snow\n\n"
    );
}

#[test]
fn write_srt_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subs").join("out.srt");
    write_srt(&path, &single_cue_track("hello", 2.0)).unwrap();
    let body = std::fs::read_to_string(&path).unwrap();
    assert!(body.starts_with("1\n00:00:00,000 --> 00:00:02,000\nhello"));
}
