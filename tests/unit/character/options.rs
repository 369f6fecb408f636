use super::*;

#[test]
fn empty_json_uses_defaults() {
    let opts = CharacterOptions::from_json("{}").unwrap();
    assert_eq!(opts, CharacterOptions::default());
    assert_eq!(opts.delay_between_strokes(), Duration::ZERO);
}

#[test]
fn camel_case_delay_alias_is_accepted() {
    let opts = CharacterOptions::from_json(r#"{ "delayBetweenStrokes": 250 }"#).unwrap();
    assert_eq!(opts.delay_between_strokes_ms, 250);
}

#[test]
fn stroke_options_pass_through() {
    let opts = CharacterOptions::from_json(
        r#"{ "stroke": { "stroke_width": 4.5, "ease": "Linear", "fade_duration_ms": 0 } }"#,
    )
    .unwrap();
    assert_eq!(opts.stroke.stroke_width, 4.5);
    assert_eq!(opts.stroke.ease, Ease::Linear);
    assert_eq!(opts.stroke.fade_duration(), Duration::ZERO);
    assert_eq!(opts.stroke.stroke_animation_duration_ms, 1000);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = CharacterOptions::from_json("{ nope").unwrap_err();
    assert!(matches!(err, InkError::Serde(_)));
}

#[test]
fn validate_rejects_bad_stroke_values() {
    let mut opts = CharacterOptions::default();
    opts.stroke.stroke_width = f64::NAN;
    assert!(matches!(opts.validate(), Err(InkError::Validation(_))));

    let mut opts = CharacterOptions::default();
    opts.stroke.frame_interval_ms = 0;
    assert!(opts.validate().unwrap_err().to_string().contains("frame_interval_ms"));
}
