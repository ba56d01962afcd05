use std::str::FromStr;

use palette::Hsl;
use serde::{Deserialize, Serialize};

use super::{hue_degrees, parse_hsl, to_hex, ColorError};

/// Named hue-rotation recipe. Offsets are degrees added to the base hue;
/// the base itself is always the first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    Identity,
    Adjacent,
    Analogous,
    Intermediate,
    Opponent,
    Complementary,
    SplitComplementary,
    Triadic,
    Tetradic,
    Rectangle,
    DoubleComplementary,
    AnalogousTriad,
    Pentad,
    Hexad,
}

impl Scheme {
    pub const ALL: [Scheme; 14] = [
        Self::Identity,
        Self::Adjacent,
        Self::Analogous,
        Self::Intermediate,
        Self::Opponent,
        Self::Complementary,
        Self::SplitComplementary,
        Self::Triadic,
        Self::Tetradic,
        Self::Rectangle,
        Self::DoubleComplementary,
        Self::AnalogousTriad,
        Self::Pentad,
        Self::Hexad,
    ];

    pub fn offsets(&self) -> &'static [f32] {
        match self {
            Self::Identity => &[0.0],
            Self::Adjacent => &[0.0, 15.0],
            Self::Analogous => &[0.0, 30.0],
            Self::Intermediate => &[0.0, 90.0],
            Self::Opponent => &[0.0, 150.0],
            Self::Complementary => &[0.0, 180.0],
            Self::SplitComplementary => &[0.0, 150.0, 210.0],
            Self::Triadic => &[0.0, 120.0, 240.0],
            Self::Tetradic => &[0.0, 90.0, 180.0, 270.0],
            Self::Rectangle => &[0.0, 60.0, 180.0, 240.0],
            Self::DoubleComplementary => &[0.0, 30.0, 180.0, 210.0],
            Self::AnalogousTriad => &[0.0, 30.0, 330.0],
            Self::Pentad => &[0.0, 72.0, 144.0, 216.0, 288.0],
            Self::Hexad => &[0.0, 60.0, 120.0, 180.0, 240.0, 300.0],
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Adjacent => "adjacent",
            Self::Analogous => "analogous",
            Self::Intermediate => "intermediate",
            Self::Opponent => "opponent",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split_complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Rectangle => "rectangle",
            Self::DoubleComplementary => "double_complementary",
            Self::AnalogousTriad => "analogous_triad",
            Self::Pentad => "pentad",
            Self::Hexad => "hexad",
        }
    }

    /// Rotate `base` by every offset of this scheme.
    pub fn rotate(&self, base: Hsl) -> Vec<Hsl> {
        let hue = hue_degrees(&base);
        self.offsets()
            .iter()
            .map(|offset| {
                Hsl::new(
                    (hue + offset).rem_euclid(360.0),
                    base.saturation,
                    base.lightness,
                )
            })
            .collect()
    }
}

impl FromStr for Scheme {
    type Err = ColorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.id() == wanted)
            .ok_or_else(|| ColorError::UnknownScheme(raw.to_string()))
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Colors of `scheme_id` built around `base`, base first.
pub fn scheme_colors(base: &str, scheme_id: &str) -> Result<Vec<String>, ColorError> {
    let scheme: Scheme = scheme_id.parse()?;
    let base = parse_hsl(base)?;
    Ok(scheme.rotate(base).into_iter().map(to_hex).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(code: &str) -> f32 {
        hue_degrees(&parse_hsl(code).unwrap())
    }

    fn hue_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn table_has_fourteen_distinct_entries() {
        let mut ids: Vec<_> = Scheme::ALL.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 14);
        assert_eq!(Scheme::Hexad.offsets().len(), 6);
    }

    #[test]
    fn tetradic_rotates_by_quarters() {
        let base = "#3366cc";
        let h = hue_of(base);
        let colors = scheme_colors(base, "tetradic").unwrap();
        assert_eq!(colors.len(), 4);
        for (color, offset) in colors.iter().zip([0.0, 90.0, 180.0, 270.0]) {
            let expected = (h + offset).rem_euclid(360.0);
            assert!(
                hue_distance(hue_of(color), expected) < 1.5,
                "{color} should sit near {expected}"
            );
        }
    }

    #[test]
    fn complementary_of_red_is_cyan() {
        let colors = scheme_colors("#ff0000", "complementary").unwrap();
        assert_eq!(colors, vec!["#ff0000".to_string(), "#00ffff".to_string()]);
    }

    #[test]
    fn scheme_ids_accept_dashes_and_case() {
        assert_eq!("Split-Complementary".parse::<Scheme>(), Ok(Scheme::SplitComplementary));
    }

    #[test]
    fn unknown_scheme_fails() {
        assert_eq!(
            scheme_colors("#ff0000", "heptad"),
            Err(ColorError::UnknownScheme("heptad".into()))
        );
    }

    #[test]
    fn invalid_base_fails_without_panicking() {
        assert!(matches!(
            scheme_colors("not-a-color", "triadic"),
            Err(ColorError::InvalidColor(_))
        ));
    }
}
