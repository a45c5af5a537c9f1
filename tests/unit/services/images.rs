use super::*;

fn write_png(path: &Path, rgb: [u8; 3]) {
    let img = image::RgbImage::from_pixel(6, 4, image::Rgb(rgb));
    img.save(path).unwrap();
}

#[test]
fn key_frame_prompt_numbers_from_one() {
    assert_eq!(
        key_frame_prompt("A lighthouse", 0),
        "A lighthouse Frame 1: With slight variation in perspective, lighting, or movement"
    );
    assert!(key_frame_prompt("x", 3).contains("Frame 4:"));
}

#[test]
fn quality_maps_to_image_request() {
    let draft = ImageRequest::for_quality(Quality::Draft);
    assert_eq!((draft.model, draft.size), ("dall-e-2", "512x512"));
    assert!(draft.body("p").get("quality").is_none());

    let high = ImageRequest::for_quality(Quality::High).body("p");
    assert_eq!(high["model"], "dall-e-3");
    assert_eq!(high["quality"], "hd");
    assert_eq!(high["n"], 1);
}

#[test]
fn file_supplier_cycles_paths() {
    let dir = tempfile::tempdir().unwrap();
    let red = dir.path().join("red.png");
    let blue = dir.path().join("blue.png");
    write_png(&red, [255, 0, 0]);
    write_png(&blue, [0, 0, 255]);

    let s = ImageFileSupplier::new(vec![red, blue]).unwrap();
    let px = |i| s.supply("", i, Quality::Draft).unwrap().pixel(0, 0);
    assert_eq!(px(0), Some([255, 0, 0]));
    assert_eq!(px(1), Some([0, 0, 255]));
    assert_eq!(px(2), Some([255, 0, 0]));
}

#[test]
fn file_supplier_errors_are_acquisition_failures() {
    assert!(matches!(
        ImageFileSupplier::new(Vec::new()),
        Err(ReelError::InvalidInput(_))
    ));
    let s = ImageFileSupplier::new(vec![PathBuf::from("/definitely/missing.png")]).unwrap();
    assert!(matches!(
        s.supply("", 0, Quality::Standard),
        Err(ReelError::Acquisition(_))
    ));
}

#[test]
fn closures_are_suppliers() {
    let supplier = |_: &str, i: usize, _: Quality| Frame::solid(2, 2, [i as u8, 0, 0]);
    let f = supplier.supply("p", 7, Quality::High).unwrap();
    assert_eq!(f.pixel(1, 1), Some([7, 0, 0]));
}
