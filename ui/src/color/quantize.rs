/// Hue grid used by the wheel: 24 positions.
pub const HUE_STEP_DEGREES: f64 = 15.0;
/// Saturation/lightness grid: ten steps over `[0, 1]`.
pub const LEVEL_STEP: f64 = 0.1;

/// Snap a hue to the nearest multiple of 15°, wrapped into `[0, 360)`.
pub fn quantize_hue(hue: f64) -> f64 {
    ((hue / HUE_STEP_DEGREES).round() * HUE_STEP_DEGREES).rem_euclid(360.0)
}

/// Snap a saturation or lightness value to the nearest tenth, clamped to `[0, 1]`.
pub fn quantize_level(value: f64) -> f64 {
    ((value / LEVEL_STEP).round() * LEVEL_STEP).clamp(0.0, 1.0)
}
