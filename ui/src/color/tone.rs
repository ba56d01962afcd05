use palette::Hsl;

use super::{parse_hsl, to_hex, ColorError};

/// Signed steps applied to the 0..1 lightness channel. Saturation
/// multipliers are derived from the same list as `1 + offset`.
pub const TONE_OFFSETS: [f32; 8] = [-0.8, -0.6, -0.4, -0.2, 0.2, 0.4, 0.6, 0.8];

#[derive(Debug, Clone, PartialEq)]
pub struct ToneSteps {
    pub lightness_offsets: Vec<f32>,
    pub saturation_multipliers: Vec<f32>,
}

impl Default for ToneSteps {
    fn default() -> Self {
        Self {
            lightness_offsets: TONE_OFFSETS.to_vec(),
            saturation_multipliers: TONE_OFFSETS.iter().map(|offset| 1.0 + offset).collect(),
        }
    }
}

impl ToneSteps {
    pub fn len(&self) -> usize {
        self.lightness_offsets.len() + self.saturation_multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lightness variants first, then saturation variants, each in list order.
    pub fn apply(&self, base: Hsl) -> Vec<Hsl> {
        let lightness = self.lightness_offsets.iter().map(|offset| {
            Hsl::new(
                base.hue,
                base.saturation,
                (base.lightness + offset).clamp(0.0, 1.0),
            )
        });
        let saturation = self.saturation_multipliers.iter().map(|factor| {
            Hsl::new(
                base.hue,
                (base.saturation * factor).clamp(0.0, 1.0),
                base.lightness,
            )
        });
        lightness.chain(saturation).collect()
    }
}

/// The sixteen default tone variants of `base`.
pub fn tone_variants(base: &str) -> Result<Vec<String>, ColorError> {
    tone_variants_with(base, &ToneSteps::default())
}

pub fn tone_variants_with(base: &str, steps: &ToneSteps) -> Result<Vec<String>, ColorError> {
    let base = parse_hsl(base)?;
    Ok(steps.apply(base).into_iter().map(to_hex).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_steps_yield_sixteen_variants() {
        let variants = tone_variants("#3366cc").unwrap();
        assert_eq!(variants.len(), 16);
        assert_eq!(ToneSteps::default().len(), 16);
    }

    #[test]
    fn multipliers_skip_the_identity_factor() {
        let steps = ToneSteps::default();
        assert!(steps
            .saturation_multipliers
            .iter()
            .all(|factor| (factor - 1.0).abs() > 1e-6));
        assert!((steps.saturation_multipliers[0] - 0.2).abs() < 1e-6);
        assert!((steps.saturation_multipliers[7] - 1.8).abs() < 1e-6);
    }

    #[test]
    fn lightness_is_clamped() {
        // Mid-grey pushed by ±0.8 saturates at black and white.
        let variants = tone_variants("#808080").unwrap();
        assert_eq!(variants[0], "#000000");
        assert_eq!(variants[7], "#ffffff");
    }

    #[test]
    fn custom_steps_control_the_output() {
        let steps = ToneSteps {
            lightness_offsets: vec![0.1],
            saturation_multipliers: vec![],
        };
        assert_eq!(tone_variants_with("#ff0000", &steps).unwrap().len(), 1);
    }

    #[test]
    fn invalid_base_is_reported() {
        assert!(tone_variants("#zzz").is_err());
    }
}
