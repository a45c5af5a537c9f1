use super::*;

#[test]
fn from_rgb8_rejects_length_mismatch() {
    assert!(Frame::from_rgb8(2, 2, vec![0; 11]).is_err());
    assert!(Frame::from_rgb8(0, 2, Vec::new()).is_err());
    assert!(Frame::from_rgb8(2, 2, vec![0; 12]).is_ok());
}

#[test]
fn solid_frame_fills_every_pixel() {
    let f = Frame::solid(3, 2, [1, 2, 3]).unwrap();
    assert_eq!(f.as_rgb8().len(), 18);
    assert_eq!(f.pixel(2, 1), Some([1, 2, 3]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn clones_share_pixels_and_resize_to_same_size_is_free() {
    let f = Frame::solid(4, 4, [9, 9, 9]).unwrap();
    let g = f.clone();
    assert!(f.shares_pixels(&g));
    let same = f.resized(f.canvas()).unwrap();
    assert!(f.shares_pixels(&same));
}

#[test]
fn resize_changes_dimensions_and_keeps_solid_color() {
    let f = Frame::solid(8, 8, [40, 80, 120]).unwrap();
    let r = f.resized(Canvas::new(4, 2).unwrap()).unwrap();
    assert_eq!((r.width(), r.height()), (4, 2));
    assert_eq!(r.pixel(1, 1), Some([40, 80, 120]));
}

#[test]
fn quality_parses_case_insensitively_and_serializes_lowercase() {
    assert_eq!("HIGH".parse::<Quality>().unwrap(), Quality::High);
    assert_eq!(" draft ".parse::<Quality>().unwrap(), Quality::Draft);
    assert!(matches!(
        "ultra".parse::<Quality>(),
        Err(ReelError::InvalidInput(_))
    ));
    assert_eq!(serde_json::to_string(&Quality::Standard).unwrap(), "\"standard\"");
    assert_eq!(Quality::default(), Quality::Standard);
}
