use notepad_core::{AttributeSet, StyleAttribute, StyleError, StyleInterval, StyleRangeEngine};

fn set(attributes: &[StyleAttribute]) -> AttributeSet {
    attributes.iter().copied().collect()
}

#[test]
fn bold_then_italic_yields_three_runs() {
    let mut engine = StyleRangeEngine::new();
    engine.apply_style(0, 10, StyleAttribute::Bold);
    engine.apply_style(5, 10, StyleAttribute::Italic);

    for offset in 0..5 {
        assert_eq!(engine.attributes_at(offset), set(&[StyleAttribute::Bold]));
    }
    for offset in 5..10 {
        assert_eq!(
            engine.attributes_at(offset),
            set(&[StyleAttribute::Bold, StyleAttribute::Italic])
        );
    }
    for offset in 10..15 {
        assert_eq!(engine.attributes_at(offset), set(&[StyleAttribute::Italic]));
    }
    assert_eq!(engine.attributes_at(15), AttributeSet::EMPTY);
}

#[test]
fn underline_preserves_bold_and_italic_across_gaps() {
    let mut engine = StyleRangeEngine::new();
    engine.apply_style(2, 2, StyleAttribute::Bold);
    engine.apply_style(6, 2, StyleAttribute::Italic);
    engine.apply_underline(0, 10);

    assert_eq!(
        engine.intervals(),
        &[
            StyleInterval::new(0, 2, StyleAttribute::Underline),
            StyleInterval::new(2, 2, set(&[StyleAttribute::Bold, StyleAttribute::Underline])),
            StyleInterval::new(4, 2, StyleAttribute::Underline),
            StyleInterval::new(6, 2, set(&[StyleAttribute::Italic, StyleAttribute::Underline])),
            StyleInterval::new(8, 2, StyleAttribute::Underline),
        ]
    );
    assert_eq!(engine.serialize(), "0,2,0,1,2,2,1,1,4,2,0,1,6,2,2,1,8,2,0,1,");
}

#[test]
fn repeated_application_is_idempotent() {
    let mut engine = StyleRangeEngine::new();
    engine.apply_style(1, 6, StyleAttribute::Italic);
    engine.apply_style(3, 6, StyleAttribute::Bold);
    let once = engine.clone();

    engine.apply_style(3, 6, StyleAttribute::Bold);
    assert_eq!(engine, once);
}

#[test]
fn clear_resets_bold_underline_range() {
    let mut engine = StyleRangeEngine::new();
    engine.apply_style(0, 8, StyleAttribute::Bold);
    engine.apply_underline(0, 8);
    engine.clear_styles(0, 8);

    assert!(engine.is_empty());
    assert_eq!(engine.serialize(), "");
}

#[test]
fn zero_length_style_leaves_set_unchanged() {
    let mut engine = StyleRangeEngine::new();
    engine.apply_style(0, 3, StyleAttribute::Italic);
    let before = engine.serialize();

    engine.apply_style(1, 0, StyleAttribute::Bold);
    assert_eq!(engine.serialize(), before);
}

#[test]
fn engine_output_survives_serialization() {
    let mut engine = StyleRangeEngine::new();
    engine.apply_style(0, 20, StyleAttribute::Italic);
    engine.apply_style(4, 4, StyleAttribute::Bold);
    engine.apply_underline(6, 10);
    engine.clear_styles(12, 2);
    engine.apply_style(30, 5, StyleAttribute::Bold);

    let mut restored = StyleRangeEngine::new();
    restored.deserialize(&engine.serialize()).unwrap();
    assert_eq!(restored.intervals(), engine.intervals());
}

#[test]
fn malformed_blob_is_reported() {
    let mut engine = StyleRangeEngine::new();
    let err = engine.deserialize("1,2,x,0,").unwrap_err();
    assert!(matches!(err, StyleError::MalformedStyleData(_)));
    assert!(engine.is_empty());
}
