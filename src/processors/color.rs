//! Color sampling from pixel data.
//!
//! Three jobs live here: extracting a prominence-ordered palette from an
//! image region, recovering the foreground color of rendered text, and
//! putting a categorical name on an RGB value. Degenerate regions never
//! panic; they fall back to an empty palette or black.

use std::cmp::Reverse;

use image::{GrayImage, RgbImage};
use imageproc::contrast::otsu_level;
use itertools::Itertools;
use tracing::warn;

use crate::core::ColorConfig;
use crate::domain::{ColorSwatch, Rgb};

/// Pixel budget for palette clustering; larger regions are strided down to
/// roughly this many samples.
const MAX_CLUSTER_SAMPLES: usize = 10_000;

/// Number of clusters used when only the single dominant color is wanted.
const DOMINANT_CLUSTERS: usize = 4;

/// Samples palette, fill and text colors from image regions.
#[derive(Debug, Clone)]
pub struct ColorSampler {
    config: ColorConfig,
}

impl ColorSampler {
    /// Creates a sampler with the given settings.
    pub fn new(config: ColorConfig) -> Self {
        Self { config }
    }

    /// Extracts a palette of up to `palette_size` swatches, ordered by
    /// cluster population (most prominent first).
    ///
    /// Clustering is a fixed-iteration k-means seeded from evenly spaced
    /// pixels, so identical input always produces an identical palette. An
    /// empty region yields an empty palette.
    pub fn palette(&self, image: &RgbImage) -> Vec<ColorSwatch> {
        let centroids = self.cluster(image, self.config.palette_size);

        centroids
            .into_iter()
            .enumerate()
            .map(|(idx, rgb)| ColorSwatch {
                id: format!("color_{idx}"),
                hex: rgb.to_hex(),
                rgb,
                name: self.color_name(rgb).to_string(),
            })
            .collect()
    }

    /// Returns the single most representative color of a region.
    ///
    /// Degenerate (zero-size) regions log a warning and return black.
    pub fn dominant_color(&self, region: &RgbImage) -> Rgb {
        match self.cluster(region, DOMINANT_CLUSTERS).into_iter().next() {
            Some(rgb) => rgb,
            None => {
                warn!("dominant color requested for empty region, defaulting to black");
                Rgb::BLACK
            }
        }
    }

    /// Recovers the foreground color of rendered text in a region.
    ///
    /// The region is binarized with an Otsu threshold on its luma channel and
    /// the minority-intensity class is assumed to be the glyph pixels: the
    /// dark class is tried first, then the light class if no pixel fell below
    /// the threshold. The per-channel median of the chosen pixels is the text
    /// color. Degenerate input returns black without panicking.
    pub fn text_color(&self, region: &RgbImage) -> Rgb {
        if region.width() == 0 || region.height() == 0 {
            warn!("text color requested for empty region, defaulting to black");
            return Rgb::BLACK;
        }

        let gray: GrayImage = image::imageops::grayscale(region);
        let threshold = otsu_level(&gray);

        let dark: Vec<[u8; 3]> = self.pixels_in_class(region, &gray, threshold, true);
        let glyph_pixels = if dark.is_empty() {
            self.pixels_in_class(region, &gray, threshold, false)
        } else {
            dark
        };

        if glyph_pixels.is_empty() {
            return Rgb::BLACK;
        }

        Rgb::new(
            channel_median(&glyph_pixels, 0),
            channel_median(&glyph_pixels, 1),
            channel_median(&glyph_pixels, 2),
        )
    }

    /// Puts a categorical name on an RGB value.
    ///
    /// Rules are evaluated in order with the first match winning: white,
    /// black, the dominant primaries, the two-channel pairings, then gray.
    pub fn color_name(&self, rgb: Rgb) -> &'static str {
        let c = &self.config;
        let (r, g, b) = (rgb.r as i32, rgb.g as i32, rgb.b as i32);
        let white = c.white_min as i32;
        let black = c.black_max as i32;
        let dom = c.primary_dominance as i32;

        if r > white && g > white && b > white {
            "white"
        } else if r < black && g < black && b < black {
            "black"
        } else if r > g.max(b) + dom {
            "red"
        } else if g > r.max(b) + dom {
            "green"
        } else if b > r.max(g) + dom {
            "blue"
        } else if r > c.yellow_min as i32 && g > c.yellow_min as i32 {
            "yellow"
        } else if r > c.secondary_min as i32 && b > c.secondary_min as i32 {
            "purple"
        } else if g > c.secondary_min as i32 && b > c.secondary_min as i32 {
            "cyan"
        } else {
            "gray"
        }
    }

    /// Collects RGB pixels whose luma is at or below (dark) or above (light)
    /// the threshold.
    fn pixels_in_class(
        &self,
        region: &RgbImage,
        gray: &GrayImage,
        threshold: u8,
        dark: bool,
    ) -> Vec<[u8; 3]> {
        region
            .pixels()
            .zip(gray.pixels())
            .filter(|(_, luma)| {
                if dark {
                    luma.0[0] <= threshold
                } else {
                    luma.0[0] > threshold
                }
            })
            .map(|(pixel, _)| pixel.0)
            .collect()
    }

    /// K-means over the region's pixels, returning centroids ordered by
    /// cluster population. Empty input yields an empty vector.
    fn cluster(&self, image: &RgbImage, k: usize) -> Vec<Rgb> {
        let raw = image.as_raw();
        let pixel_count = raw.len() / 3;
        if pixel_count == 0 || k == 0 {
            return Vec::new();
        }

        // Stride the region down to a bounded sample set; the stride is a
        // pure function of the input size, keeping the result deterministic.
        let stride = pixel_count.div_ceil(MAX_CLUSTER_SAMPLES).max(1);
        let samples: Vec<[f32; 3]> = (0..pixel_count)
            .step_by(stride)
            .map(|i| {
                let p = &raw[i * 3..i * 3 + 3];
                [p[0] as f32, p[1] as f32, p[2] as f32]
            })
            .collect();

        let k = k.min(samples.len());
        let mut centroids: Vec<[f32; 3]> =
            (0..k).map(|i| samples[i * samples.len() / k]).collect();
        let mut counts = vec![0usize; k];

        for _ in 0..self.config.max_cluster_iterations {
            let mut sums = vec![[0.0f32; 3]; k];
            counts.fill(0);

            for sample in &samples {
                let cluster = nearest_centroid(sample, &centroids);
                for channel in 0..3 {
                    sums[cluster][channel] += sample[channel];
                }
                counts[cluster] += 1;
            }

            let mut moved = false;
            for (cluster, count) in counts.iter().enumerate() {
                // Empty clusters keep their previous centroid.
                if *count > 0 {
                    let updated = [
                        sums[cluster][0] / *count as f32,
                        sums[cluster][1] / *count as f32,
                        sums[cluster][2] / *count as f32,
                    ];
                    if updated != centroids[cluster] {
                        moved = true;
                        centroids[cluster] = updated;
                    }
                }
            }

            if !moved {
                break;
            }
        }

        // Population order, ties broken by cluster index for determinism.
        centroids
            .iter()
            .zip(counts.iter())
            .enumerate()
            .filter(|(_, (_, count))| **count > 0)
            .sorted_by_key(|(idx, (_, count))| (Reverse(**count), *idx))
            .map(|(_, (c, _))| {
                Rgb::new(
                    c[0].round().clamp(0.0, 255.0) as u8,
                    c[1].round().clamp(0.0, 255.0) as u8,
                    c[2].round().clamp(0.0, 255.0) as u8,
                )
            })
            .collect()
    }
}

impl Default for ColorSampler {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

/// Index of the closest centroid by squared RGB distance; ties resolve to the
/// lowest index.
fn nearest_centroid(sample: &[f32; 3], centroids: &[[f32; 3]]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let dist = sample
            .iter()
            .zip(centroid.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>();
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best
}

/// Median of one channel across a pixel set (average of the two middle values
/// for even-length sets).
fn channel_median(pixels: &[[u8; 3]], channel: usize) -> u8 {
    let mut values: Vec<u8> = pixels.iter().map(|p| p[channel]).collect();
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        ((values[mid - 1] as u16 + values[mid] as u16) / 2) as u8
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb as ImageRgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, ImageRgb(color))
    }

    #[test]
    fn empty_region_yields_empty_palette() {
        let sampler = ColorSampler::default();
        assert!(sampler.palette(&RgbImage::new(0, 0)).is_empty());
    }

    #[test]
    fn empty_region_text_color_is_black() {
        let sampler = ColorSampler::default();
        assert_eq!(sampler.text_color(&RgbImage::new(0, 0)), Rgb::BLACK);
        assert_eq!(sampler.text_color(&RgbImage::new(5, 0)), Rgb::BLACK);
    }

    #[test]
    fn solid_region_palette_has_one_swatch() {
        let sampler = ColorSampler::default();
        let palette = sampler.palette(&solid(16, 16, [10, 200, 30]));
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].rgb, Rgb::new(10, 200, 30));
        assert_eq!(palette[0].id, "color_0");
        assert_eq!(palette[0].name, "green");
    }

    #[test]
    fn dominant_color_of_solid_region() {
        let sampler = ColorSampler::default();
        assert_eq!(
            sampler.dominant_color(&solid(8, 8, [240, 10, 10])),
            Rgb::new(240, 10, 10)
        );
        assert_eq!(sampler.dominant_color(&RgbImage::new(0, 0)), Rgb::BLACK);
    }

    #[test]
    fn text_color_finds_dark_glyphs_on_light_ground() {
        // White background with a dark red block of "glyph" pixels.
        let mut region = solid(20, 10, [250, 250, 250]);
        for y in 3..7 {
            for x in 5..15 {
                region.put_pixel(x, y, ImageRgb([120, 10, 10]));
            }
        }
        let sampler = ColorSampler::default();
        let color = sampler.text_color(&region);
        assert_eq!(color, Rgb::new(120, 10, 10));
    }

    #[test]
    fn text_color_falls_back_to_light_class() {
        // Uniform region: whichever class ends up non-empty must win without
        // panicking, and the answer is the region's own color.
        let sampler = ColorSampler::default();
        let color = sampler.text_color(&solid(10, 10, [240, 240, 240]));
        assert_eq!(color, Rgb::new(240, 240, 240));
    }

    #[test]
    fn palette_is_deterministic() {
        let mut region = solid(32, 32, [200, 40, 40]);
        for y in 0..16 {
            for x in 0..32 {
                region.put_pixel(x, y, ImageRgb([30, 30, 220]));
            }
        }
        let sampler = ColorSampler::default();
        assert_eq!(sampler.palette(&region), sampler.palette(&region));
    }

    #[test]
    fn color_names_follow_rule_order() {
        let sampler = ColorSampler::default();
        assert_eq!(sampler.color_name(Rgb::new(250, 250, 250)), "white");
        assert_eq!(sampler.color_name(Rgb::new(10, 20, 30)), "black");
        assert_eq!(sampler.color_name(Rgb::new(200, 100, 100)), "red");
        assert_eq!(sampler.color_name(Rgb::new(40, 180, 60)), "green");
        assert_eq!(sampler.color_name(Rgb::new(40, 60, 190)), "blue");
        assert_eq!(sampler.color_name(Rgb::new(220, 220, 40)), "yellow");
        assert_eq!(sampler.color_name(Rgb::new(180, 40, 180)), "purple");
        assert_eq!(sampler.color_name(Rgb::new(40, 180, 180)), "cyan");
        assert_eq!(sampler.color_name(Rgb::new(120, 120, 120)), "gray");
    }

    #[test]
    fn white_rule_wins_before_pairings() {
        // 210/210/210 satisfies the yellow pairing numerically, but the white
        // rule is evaluated first.
        let sampler = ColorSampler::default();
        assert_eq!(sampler.color_name(Rgb::new(210, 210, 210)), "white");
    }
}
