use super::*;

#[test]
fn defaults_match_classic_layout() {
    let cfg = CaptionConfig::default();
    assert_eq!(cfg.max_line_chars, 40);
    assert_eq!(cfg.caption_anchor, Vec2::new(0.5, 0.85));
    assert_eq!(cfg.watermark_anchor, Vec2::new(0.95, 0.95));
    assert_eq!(cfg.fill_rgba, [255, 255, 255, 255]);
    assert_eq!(cfg.outline_rgba, [0, 0, 0, 255]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn validate_rejects_bad_values() {
    let cfg = CaptionConfig {
        max_line_chars: 0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = CaptionConfig {
        font_size_px: Some(-3.0),
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = CaptionConfig {
        caption_anchor: Vec2::new(1.5, 0.5),
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn font_size_scales_with_height_with_a_floor() {
    let cfg = CaptionConfig::default();
    assert_eq!(cfg.font_size_for(64), 10.0);
    assert!((cfg.font_size_for(1000) - 45.0).abs() < 1e-3);
    let fixed = CaptionConfig {
        font_size_px: Some(18.0),
        ..Default::default()
    };
    assert_eq!(fixed.font_size_for(1000), 18.0);
}

#[test]
fn blank_watermark_is_treated_as_disabled() {
    let cfg = CaptionConfig {
        watermark: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(cfg.watermark_text(), None);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: CaptionConfig = serde_json::from_str(r#"{ "max_line_chars": 24 }"#).unwrap();
    assert_eq!(cfg.max_line_chars, 24);
    assert_eq!(cfg.watermark.as_deref(), Some("reelsmith"));
}

#[test]
fn invalid_font_bytes_are_a_render_error() {
    let err = TextCompositor::from_font_bytes(vec![0u8; 16], CaptionConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, ReelError::Render(_)));
}
