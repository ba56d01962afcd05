#![cfg(test)]
//! Guards the bundled theme against truncation or a broken path. A missing
//! stylesheet only shows up at runtime otherwise.

const MAIN_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/main.css"));

#[test]
fn main_css_exists_and_is_not_empty() {
    assert!(
        !MAIN_CSS.trim().is_empty(),
        "assets/main.css appears to be empty"
    );
}

#[test]
fn main_css_styles_the_study_panels() {
    let required = [
        "--color-bg",
        "body {",
        ".button--primary",
        ".study-card",
        ".swatch",
        ".sketch__surface",
    ];
    for token in required {
        assert!(
            MAIN_CSS.contains(token),
            "Expected token `{token}` missing from main.css"
        );
    }
}
