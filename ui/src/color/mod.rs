//! Color-scheme engine: hue-rotation schemes, tone variants and the
//! quantisation helpers used by the palette views.
//!
//! All functions are pure. Colors travel as `#rrggbb` strings; conversion to
//! and from HSL goes through `palette`.

use core::fmt;

use palette::{FromColor, Hsl, Srgb};

mod extract;
mod quantize;
mod recommend;
mod scheme;
mod tone;

pub use extract::extract_dominant_colors;
pub use quantize::{quantize_hue, quantize_level, HUE_STEP_DEGREES, LEVEL_STEP};
pub use recommend::{recommend, recommend_all, ExtractedColor, Recommendation};
pub use scheme::{scheme_colors, Scheme};
pub use tone::{tone_variants, tone_variants_with, ToneSteps, TONE_OFFSETS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    InvalidColor(String),
    UnknownScheme(String),
    InvalidImage(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(raw) => write!(f, "invalid color code `{raw}`"),
            Self::UnknownScheme(raw) => write!(f, "unknown color scheme `{raw}`"),
            Self::InvalidImage(msg) => write!(f, "unreadable image: {msg}"),
        }
    }
}

impl std::error::Error for ColorError {}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into HSL.
pub fn parse_hsl(code: &str) -> Result<Hsl, ColorError> {
    let rgb: Srgb<u8> = code
        .trim()
        .parse()
        .map_err(|_| ColorError::InvalidColor(code.to_string()))?;
    Ok(Hsl::from_color(rgb.into_format::<f32>()))
}

/// Render an HSL color as lowercase `#rrggbb`.
pub fn to_hex(hsl: Hsl) -> String {
    let rgb: Srgb<u8> = Srgb::from_color(hsl).into_format();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// `#rrggbb` for hue in degrees and saturation/lightness in `[0, 1]`.
pub fn hsl_hex(hue: f64, saturation: f64, lightness: f64) -> String {
    to_hex(Hsl::new(
        hue as f32,
        saturation.clamp(0.0, 1.0) as f32,
        lightness.clamp(0.0, 1.0) as f32,
    ))
}

/// Hue of an HSL color in `[0, 360)`.
pub fn hue_degrees(hsl: &Hsl) -> f32 {
    hsl.hue.into_positive_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_hsl() {
        for code in ["#ff0000", "#1e90ff", "#336699", "#000000", "#ffffff"] {
            let hsl = parse_hsl(code).unwrap();
            assert_eq!(to_hex(hsl), code);
        }
    }

    #[test]
    fn short_hex_and_missing_hash_are_accepted() {
        assert_eq!(to_hex(parse_hsl("#f00").unwrap()), "#ff0000");
        assert_eq!(to_hex(parse_hsl("00ff00").unwrap()), "#00ff00");
    }

    #[test]
    fn components_render_as_hex() {
        assert_eq!(hsl_hex(120.0, 1.0, 0.5), "#00ff00");
        assert_eq!(hsl_hex(0.0, 0.0, 2.0), "#ffffff");
    }

    #[test]
    fn malformed_codes_are_recoverable_errors() {
        for bad in ["", "#12", "#gggggg", "rgb(1,2,3)"] {
            assert_eq!(
                parse_hsl(bad).unwrap_err(),
                ColorError::InvalidColor(bad.to_string())
            );
        }
    }
}
