use serde::{Deserialize, Serialize};

use super::{parse_hsl, to_hex, ColorError, Scheme, ToneSteps};

/// One dominant color reported by the image extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedColor {
    pub color: String,
    /// Share of the image covered by this color, `0..=1`.
    pub usage: f64,
}

/// Scheme colors and tone variants derived from one base color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub base: String,
    pub scheme: Scheme,
    pub scheme_colors: Vec<String>,
    pub tones: Vec<String>,
}

pub fn recommend(base: &str, scheme: Scheme, steps: &ToneSteps) -> Result<Recommendation, ColorError> {
    let hsl = parse_hsl(base)?;
    Ok(Recommendation {
        base: to_hex(hsl),
        scheme,
        scheme_colors: scheme.rotate(hsl).into_iter().map(to_hex).collect(),
        tones: steps.apply(hsl).into_iter().map(to_hex).collect(),
    })
}

/// Recommendations for every extracted color, most used first. Colors that
/// fail to parse are logged and left out.
pub fn recommend_all(
    extracted: &[ExtractedColor],
    scheme: Scheme,
    steps: &ToneSteps,
) -> Vec<Recommendation> {
    let mut ordered: Vec<&ExtractedColor> = extracted.iter().collect();
    ordered.sort_by(|a, b| b.usage.total_cmp(&a.usage));

    ordered
        .into_iter()
        .filter_map(|entry| match recommend(&entry.color, scheme, steps) {
            Ok(recommendation) => Some(recommendation),
            Err(err) => {
                log::warn!("Skipping extracted color: {err}");
                None
            }
        })
        .collect()
}
