use std::collections::HashMap;

use palette::{FromColor, Hsl, Srgb};

use super::{quantize_hue, quantize_level, ColorError, ExtractedColor};

/// Pixels with alpha below this are ignored.
const MIN_ALPHA: u8 = 16;

#[derive(Default)]
struct Bucket {
    count: u64,
    sum: [u64; 3],
}

/// Dominant colors of an encoded image (PNG, JPEG, WebP or GIF), most used
/// first.
///
/// Pixels are grouped on the same hue/level grid the picker snaps to, so the
/// result lines up with what a participant can select by hand. Each group is
/// reported as its average color.
pub fn extract_dominant_colors(image_bytes: &[u8], limit: usize) -> Result<Vec<ExtractedColor>, ColorError> {
    let pixels = image::load_from_memory(image_bytes)
        .map_err(|err| ColorError::InvalidImage(err.to_string()))?
        .to_rgba8();

    let mut buckets: HashMap<(u16, u8, u8), Bucket> = HashMap::new();
    let mut total = 0u64;

    for px in pixels.pixels() {
        let [r, g, b, alpha] = px.0;
        if alpha < MIN_ALPHA {
            continue;
        }

        let hsl = Hsl::from_color(Srgb::new(r, g, b).into_format::<f32>());
        let key = (
            quantize_hue(f64::from(hsl.hue.into_positive_degrees())) as u16,
            (quantize_level(f64::from(hsl.saturation)) * 10.0).round() as u8,
            (quantize_level(f64::from(hsl.lightness)) * 10.0).round() as u8,
        );
        let bucket = buckets.entry(key).or_default();
        bucket.count += 1;
        for (acc, channel) in bucket.sum.iter_mut().zip([r, g, b]) {
            *acc += u64::from(channel);
        }
        total += 1;
    }

    if total == 0 {
        return Ok(Vec::new());
    }

    let mut ranked: Vec<Bucket> = buckets.into_values().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.sum.cmp(&b.sum)));

    Ok(ranked
        .into_iter()
        .take(limit)
        .map(|bucket| {
            let [r, g, b] = bucket.sum.map(|sum| (sum / bucket.count) as u8);
            ExtractedColor {
                color: format!("#{r:02x}{g:02x}{b:02x}"),
                usage: bucket.count as f64 / total as f64,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_rgba(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(pixels).unwrap();
        }
        buf
    }

    #[test]
    fn most_common_color_comes_first() {
        let red = [255, 0, 0, 255];
        let blue = [0, 0, 255, 255];
        let pixels: Vec<u8> = [red, red, red, blue].concat();
        let colors = extract_dominant_colors(&encode_rgba(2, 2, &pixels), 8).unwrap();

        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].color, "#ff0000");
        assert!((colors[0].usage - 0.75).abs() < 1e-9);
        assert_eq!(colors[1].color, "#0000ff");
    }

    #[test]
    fn transparent_pixels_are_ignored() {
        let pixels: Vec<u8> = [[10, 200, 10, 255], [0, 0, 0, 0]].concat();
        let colors = extract_dominant_colors(&encode_rgba(2, 1, &pixels), 8).unwrap();
        assert_eq!(colors.len(), 1);
        assert!((colors[0].usage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn limit_caps_the_result() {
        let pixels: Vec<u8> = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]].concat();
        let colors = extract_dominant_colors(&encode_rgba(3, 1, &pixels), 2).unwrap();
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn jpeg_photos_are_accepted() {
        let mut jpeg = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 0])))
            .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();

        let colors = extract_dominant_colors(&jpeg, 8).unwrap();
        assert_eq!(colors.len(), 1);
        assert!((colors[0].usage - 1.0).abs() < 1e-9);
        let hsl = crate::color::parse_hsl(&colors[0].color).unwrap();
        assert_eq!(quantize_hue(f64::from(hsl.hue.into_positive_degrees())), 0.0);
    }

    #[test]
    fn unreadable_bytes_are_an_error() {
        assert!(matches!(
            extract_dominant_colors(b"definitely not an image", 4),
            Err(ColorError::InvalidImage(_))
        ));
    }
}
