use super::*;

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const YELLOW: [u8; 3] = [255, 255, 0];

fn solids(colors: &[[u8; 3]], size: u32) -> KeyFrameSet {
    let frames = colors
        .iter()
        .map(|&c| Frame::solid(size, size, c).unwrap())
        .collect();
    KeyFrameSet::new(frames).unwrap()
}

#[test]
fn length_is_exact_for_many_shapes() {
    for n in 2..=6usize {
        let colors: Vec<[u8; 3]> = (0..n).map(|i| [(i * 40) as u8, 0, 0]).collect();
        let keys = solids(&colors, 2);
        for (secs, fps) in [(1.0, 24u32), (2.0, 24), (5.0, 30), (3.0, 7), (0.5, 10), (1.0, 1)] {
            let seq = interpolate(&keys, secs, fps).unwrap();
            let expected = (secs * f64::from(fps)).round() as usize;
            assert_eq!(seq.len(), expected, "n={n} secs={secs} fps={fps}");
        }
    }
}

#[test]
fn endpoints_match_first_and_last_key_frames() {
    let keys = solids(&[RED, GREEN, BLUE, YELLOW], 4);
    let seq = interpolate(&keys, 2.0, 24).unwrap();
    assert_eq!(TransitionPlan::new(4, 48).unwrap().padding, 0);
    assert_eq!(seq.frames()[0], keys.frames()[0]);
    assert!(seq.frames()[47].shares_pixels(keys.last()));
    // The frame before it is still a blend toward the last key frame.
    assert_eq!(seq.frames()[46].pixel(0, 0), Some([223, 223, 32]));
}

#[test]
fn two_key_frames_end_on_the_second() {
    let keys = solids(&[RED, GREEN], 2);
    for (secs, fps) in [(1.0, 24u32), (0.5, 10), (3.0, 7)] {
        let seq = interpolate(&keys, secs, fps).unwrap();
        assert_eq!(seq.frames()[0], keys.frames()[0]);
        assert_eq!(seq.frames().last(), Some(keys.last()), "secs={secs} fps={fps}");
    }
}

#[test]
fn single_channel_blend_follows_round_half_up() {
    let a = Frame::solid(1, 1, [10, 0, 0]).unwrap();
    let b = Frame::solid(1, 1, [21, 0, 0]).unwrap();
    let keys = KeyFrameSet::new(vec![a, b]).unwrap();
    let seq = interpolate(&keys, 1.0, 8).unwrap();
    // The final frame is pinned to the last key frame; the rest follow the blend.
    assert_eq!(seq.frames()[7].pixel(0, 0), Some([21, 0, 0]));
    for (j, f) in seq.frames()[..7].iter().enumerate() {
        let exact = 10.0 + 11.0 * (j as f64) / 8.0;
        let expected = (exact + 0.5).floor() as u8;
        assert_eq!(f.pixel(0, 0).unwrap()[0], expected, "j={j}");
        assert_eq!(f.pixel(0, 0).unwrap()[1], 0);
    }
}

#[test]
fn single_key_frame_is_repeated() {
    let keys = solids(&[BLUE], 3);
    let seq = interpolate(&keys, 2.0, 5).unwrap();
    assert_eq!(seq.len(), 10);
    for f in seq.frames() {
        assert!(f.shares_pixels(&keys.frames()[0]));
    }
}

#[test]
fn remainder_is_padded_with_last_key_frame() {
    let keys = solids(&[RED, GREEN, BLUE], 2);
    // 25 frames over 2 transitions: 12 each, 1 padding frame.
    let plan = TransitionPlan::new(keys.len(), 25).unwrap();
    assert_eq!(plan.frames_per_transition, 12);
    assert_eq!(plan.padding, 1);

    let seq = interpolate(&keys, 1.0, 25).unwrap();
    assert_eq!(seq.len(), 25);
    assert!(seq.frames()[24].shares_pixels(keys.last()));
    assert_eq!(seq.frames()[12], keys.frames()[1]);
}

#[test]
fn fewer_frames_than_transitions_pads_everything() {
    let plan = TransitionPlan::new(4, 2).unwrap();
    assert_eq!(plan.frames_per_transition, 0);
    assert_eq!(plan.padding, 2);
}

#[test]
fn four_solid_colors_two_seconds_at_24fps() {
    let keys = solids(&[RED, GREEN, BLUE, YELLOW], 64);
    let plan = TransitionPlan::new(keys.len(), total_frames(2.0, 24).unwrap()).unwrap();
    assert_eq!(plan.total_frames, 48);
    assert_eq!(plan.frames_per_transition, 16);
    assert_eq!(plan.padding, 0);

    let seq = interpolate(&keys, 2.0, 24).unwrap();
    assert_eq!(seq.len(), 48);
    assert_eq!(seq.canvas(), Canvas::new(64, 64).unwrap());
    assert_eq!(seq.frames()[8].pixel(10, 10), Some([128, 128, 0]));
    assert_eq!(seq.frames()[16], keys.frames()[1]);
    assert_eq!(seq.frames()[32], keys.frames()[2]);
}

#[test]
fn invalid_arguments_are_rejected() {
    let keys = solids(&[RED, GREEN], 2);
    assert!(matches!(interpolate(&keys, 0.0, 24), Err(ReelError::InvalidInput(_))));
    assert!(matches!(interpolate(&keys, -1.0, 24), Err(ReelError::InvalidInput(_))));
    assert!(matches!(interpolate(&keys, f64::NAN, 24), Err(ReelError::InvalidInput(_))));
    assert!(matches!(interpolate(&keys, 1.0, 0), Err(ReelError::InvalidInput(_))));
    assert!(matches!(KeyFrameSet::new(Vec::new()), Err(ReelError::InvalidInput(_))));
}

#[test]
fn huge_durations_are_rejected_without_allocating() {
    let keys = solids(&[RED], 2);
    assert!(matches!(interpolate(&keys, 1e17, 24), Err(ReelError::InvalidInput(_))));
    assert!(matches!(total_frames(f64::MAX, 1), Err(ReelError::InvalidInput(_))));

    let limit_secs = MAX_TOTAL_FRAMES as f64;
    assert_eq!(total_frames(limit_secs, 1).unwrap(), MAX_TOTAL_FRAMES);
    assert!(total_frames(limit_secs + 1.0, 1).is_err());
}

#[test]
fn mixed_key_frame_sizes_are_rejected_unless_conformed() {
    let frames = vec![
        Frame::solid(4, 4, RED).unwrap(),
        Frame::solid(8, 8, GREEN).unwrap(),
    ];
    assert!(KeyFrameSet::new(frames.clone()).is_err());
    let set = KeyFrameSet::conformed(frames, Canvas::new(4, 4).unwrap()).unwrap();
    assert_eq!(set.canvas(), Canvas::new(4, 4).unwrap());
}
