use image::{imageops, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Rec. 601 luma, 0..=255.
    pub fn luminance(self) -> u8 {
        let y = 299 * self.0 as u32 + 587 * self.1 as u32 + 114 * self.2 as u32;
        (y / 1000) as u8
    }

    /// Composites `self` at `alpha` over an opaque `under`.
    pub fn over(self, under: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| (top as f32 * a + bottom as f32 * (1.0 - a)).round() as u8;
        Rgb(mix(self.0, under.0), mix(self.1, under.1), mix(self.2, under.2))
    }
}

/// Background tints derived from an album's dominant color: the art panel
/// gets the color itself, the now-playing label gets it at half opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub art: Rgb,
    pub label: Rgb,
}

impl Tint {
    pub const LABEL_ALPHA: f32 = 0.5;

    pub fn from_dominant(dominant: Rgb, base: Rgb) -> Self {
        Self {
            art: dominant,
            label: dominant.over(base, Self::LABEL_ALPHA),
        }
    }
}

pub fn dominant_rgb_from_image_bytes(image_bytes: &[u8]) -> Option<Rgb> {
    let img = image::load_from_memory(image_bytes).ok()?;
    dominant_rgb(img.to_rgba8())
}

pub fn dominant_rgb(mut rgba: RgbaImage) -> Option<Rgb> {
    // Downsample aggressively for speed.
    let (w, h) = rgba.dimensions();
    let target: u32 = 48;
    if w > target || h > target {
        let scale_w = target as f32 / w as f32;
        let scale_h = target as f32 / h as f32;
        let scale = scale_w.min(scale_h).min(1.0);
        let new_w = ((w as f32) * scale).round().max(8.0) as u32;
        let new_h = ((h as f32) * scale).round().max(8.0) as u32;
        rgba = imageops::resize(&rgba, new_w, new_h, imageops::FilterType::Triangle);
    }

    // 5-bit buckets per channel, weighted toward saturated pixels.
    let mut buckets = vec![0u32; 32 * 32 * 32];
    let mut fallback = [0u64; 4];
    for p in rgba.pixels() {
        let [r, g, b, a] = p.0;
        if a < 16 {
            continue;
        }
        fallback[0] += r as u64;
        fallback[1] += g as u64;
        fallback[2] += b as u64;
        fallback[3] += 1;

        let max = r.max(g).max(b) as i32;
        let min = r.min(g).min(b) as i32;
        let sum = (r as i32) + (g as i32) + (b as i32);

        // near-black and near-white are usually borders/background
        if sum <= 24 || sum >= 750 {
            continue;
        }

        let sat = (max - min).max(0) as u32;
        let weight = 1u32 + (sat / 24);

        let idx = ((r >> 3) as usize) << 10 | ((g >> 3) as usize) << 5 | (b >> 3) as usize;
        buckets[idx] = buckets[idx].saturating_add(weight);
    }

    let best = buckets
        .iter()
        .enumerate()
        .max_by_key(|&(_, c)| c)
        .filter(|&(_, c)| *c > 0)
        .map(|(i, _)| i);

    let Some(best_idx) = best else {
        // Pure black/white art still deserves a tint; use the plain average.
        if fallback[3] == 0 {
            return None;
        }
        let n = fallback[3];
        return Some(Rgb(
            (fallback[0] / n) as u8,
            (fallback[1] / n) as u8,
            (fallback[2] / n) as u8,
        ));
    };

    let to_8 = |v5: u8| (v5 << 3) | (v5 >> 2);
    Some(Rgb(
        to_8(((best_idx >> 10) & 31) as u8),
        to_8(((best_idx >> 5) & 31) as u8),
        to_8((best_idx & 31) as u8),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::png_bytes;
    use image::Rgba;

    #[test]
    fn solid_image_yields_its_own_color() {
        let img = RgbaImage::from_pixel(64, 64, Rgba([200, 40, 40, 255]));
        let rgb = dominant_rgb_from_image_bytes(&png_bytes(&img)).unwrap();
        // bucket centers are within one 5-bit step
        assert!(rgb.0.abs_diff(200) <= 8, "{rgb:?}");
        assert!(rgb.1.abs_diff(40) <= 8, "{rgb:?}");
        assert!(rgb.2.abs_diff(40) <= 8, "{rgb:?}");
    }

    #[test]
    fn majority_color_wins() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([20, 60, 200, 255]));
        for x in 0..10 {
            for y in 0..40 {
                img.put_pixel(x, y, Rgba([220, 200, 30, 255]));
            }
        }
        let rgb = dominant_rgb(img).unwrap();
        assert!(rgb.2 > rgb.0, "{rgb:?}");
    }

    #[test]
    fn black_art_falls_back_to_average() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        assert_eq!(dominant_rgb(img), Some(Rgb(0, 0, 0)));
    }

    #[test]
    fn fully_transparent_art_has_no_color() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 0]));
        assert_eq!(dominant_rgb(img), None);
    }

    #[test]
    fn undecodable_bytes_have_no_color() {
        assert_eq!(dominant_rgb_from_image_bytes(b"definitely not an image"), None);
    }

    #[test]
    fn label_tint_is_half_opacity_over_base() {
        let tint = Tint::from_dominant(Rgb(200, 100, 0), Rgb(0, 0, 0));
        assert_eq!(tint.art, Rgb(200, 100, 0));
        assert_eq!(tint.label, Rgb(100, 50, 0));
    }
}
