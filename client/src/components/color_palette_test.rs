use super::*;

#[test]
fn swatch_class_marks_active() {
    assert!(swatch_class(true).ends_with("--active"));
    assert_eq!(swatch_class(false), "color-palette__swatch");
}

#[test]
fn swatch_style_uses_palette_hex() {
    assert_eq!(swatch_style(5), "background-color: #E50000");
}
