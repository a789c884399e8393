//! Recolouring of the transmutation tablet/table textures.
//!
//! Red, magenta and pink pixels are mapped onto a five-stop blue gradient by
//! perceived luminance: bright pixels land near the highlight stop, dark ones
//! near the shadow stop. All other pixels are left as they are.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{PatchError, Result};

pub type Rgb = (u8, u8, u8);

/// Gradient stops and the luminance mapping used to index them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    /// Highlight first, deepest shadow last
    pub stops: [Rgb; 5],
    pub t_scale: f64,
    pub t_bias: f64,
    pub t_gamma: f64,
}

// Identical neighbouring stops produce a flat band over that quarter of t.
pub const PALETTES: &[Palette] = &[
    Palette {
        name: "v2",
        stops: [
            (180, 233, 255),
            (125, 225, 255),
            (85, 205, 255),
            (55, 170, 220),
            (25, 120, 180),
        ],
        t_scale: 0.95,
        t_bias: 0.05,
        t_gamma: 1.00,
    },
    Palette {
        name: "v3",
        stops: [
            (150, 215, 245),
            (100, 200, 240),
            (70, 175, 235),
            (42, 145, 205),
            (18, 95, 155),
        ],
        t_scale: 1.18,
        t_bias: 0.08,
        t_gamma: 0.92,
    },
    Palette {
        name: "v4",
        stops: [
            (180, 233, 255),
            (180, 233, 255),
            (70, 175, 235),
            (70, 175, 235),
            (18, 95, 155),
        ],
        t_scale: 1.18,
        t_bias: 0.08,
        t_gamma: 0.92,
    },
    Palette {
        name: "v5",
        stops: [
            (180, 233, 255),
            (180, 233, 255),
            (85, 205, 255),
            (85, 205, 255),
            (18, 95, 155),
        ],
        t_scale: 1.18,
        t_bias: 0.08,
        t_gamma: 0.92,
    },
    Palette {
        name: "v6",
        stops: [
            (180, 233, 255),
            (180, 233, 255),
            (85, 205, 255),
            (85, 205, 255),
            (22, 110, 170),
        ],
        t_scale: 1.18,
        t_bias: 0.08,
        t_gamma: 0.92,
    },
    Palette {
        name: "v7",
        stops: [
            (180, 233, 255),
            (180, 233, 255),
            (76, 187, 243),
            (76, 187, 243),
            (22, 110, 170),
        ],
        t_scale: 1.18,
        t_bias: 0.08,
        t_gamma: 0.92,
    },
];

pub const DEFAULT_PALETTE: &str = "v7";

/// Look up a palette by name
pub fn palette(name: &str) -> Result<&'static Palette> {
    PALETTES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PatchError::UnknownPalette {
            name: name.to_string(),
            available: PALETTES
                .iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Colour at `t` in [0, 1] along four linear segments between the stops
pub fn gradient_color(stops: &[Rgb; 5], t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let seg = ((t * 4.0) as usize).min(3);
    let local_t = (t - seg as f64 / 4.0) * 4.0;
    let (c1, c2) = (stops[seg], stops[seg + 1]);
    (
        lerp(c1.0, c2.0, local_t),
        lerp(c1.1, c2.1, local_t),
        lerp(c1.2, c2.2, local_t),
    )
}

/// HSV in [0, 1], same convention as Python's `colorsys`
fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return (0.0, 0.0, v);
    }
    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Whether a pixel belongs to the red/magenta/pink family being recoloured
pub fn is_reddish_or_pink(r: u8, g: u8, b: u8) -> bool {
    let (h, s, v) = rgb_to_hsv(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );
    let red_hue = h <= 0.06 || h >= 0.85;
    let magenta_hue = (0.78..=0.85).contains(&h);
    let hsv_hit = (red_hue || magenta_hue) && s >= 0.08 && v >= 0.15;

    let (r, g, b) = (u16::from(r), u16::from(g), u16::from(b));
    let rgb_hit = (r >= 140 && r >= g + 8 && r >= b + 8) || (r >= 200 && (g >= 150 || b >= 150));

    hsv_hit || rgb_hit
}

/// Perceived luminance (Rec. 709 weights)
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)
}

impl Palette {
    /// Recolour a single pixel
    pub fn map_pixel(&self, Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
        if a == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        if !is_reddish_or_pink(r, g, b) {
            return Rgba([r, g, b, a]);
        }

        let mut t = 1.0 - luminance(r, g, b) / 255.0;
        t = (t * self.t_scale + self.t_bias).clamp(0.0, 1.0);
        if self.t_gamma != 1.0 {
            t = t.powf(self.t_gamma).clamp(0.0, 1.0);
        }

        let (nr, ng, nb) = gradient_color(&self.stops, t);
        Rgba([nr, ng, nb, a])
    }

    /// Recolour an image in memory; returns the number of pixels changed hue
    pub fn paint_image(&self, img: &mut RgbaImage) -> usize {
        let mut hits = 0;
        for pixel in img.pixels_mut() {
            let Rgba([r, g, b, a]) = *pixel;
            if a != 0 && is_reddish_or_pink(r, g, b) {
                hits += 1;
            }
            *pixel = self.map_pixel(*pixel);
        }
        hits
    }

    /// Read `input`, recolour it, and write the PNG to `output`
    pub fn paint(&self, input: &Path, output: &Path) -> Result<usize> {
        if !input.is_file() {
            return Err(PatchError::MissingFile {
                path: input.to_path_buf(),
            });
        }
        let mut img = image::open(input)
            .map_err(|source| PatchError::Image {
                path: input.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let hits = self.paint_image(&mut img);

        img.save_with_format(output, image::ImageFormat::Png)
            .map_err(|source| PatchError::Image {
                path: output.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            "Painted {} ({} pixels recoloured, palette {})",
            output.display(),
            hits,
            self.name
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup() {
        assert_eq!(palette("v7").unwrap().name, "v7");
        assert!(matches!(
            palette("v9"),
            Err(PatchError::UnknownPalette { .. })
        ));
        assert!(PALETTES.iter().any(|p| p.name == DEFAULT_PALETTE));
    }

    #[test]
    fn test_gradient_endpoints() {
        let stops = palette("v3").unwrap().stops;
        assert_eq!(gradient_color(&stops, 0.0), stops[0]);
        assert_eq!(gradient_color(&stops, 1.0), stops[4]);
        assert_eq!(gradient_color(&stops, 0.5), stops[2]);
        assert_eq!(gradient_color(&stops, -3.0), stops[0]);
    }

    #[test]
    fn test_gradient_flat_band() {
        let stops = palette("v7").unwrap().stops;
        assert_eq!(gradient_color(&stops, 0.1), stops[0]);
        assert_eq!(gradient_color(&stops, 0.6), stops[2]);
    }

    #[test]
    fn test_gradient_midpoint_rounds_half_to_even() {
        // Halfway between 0 and 5 is 2.5, which rounds to 2
        let stops = [(0, 0, 0), (5, 5, 5), (5, 5, 5), (5, 5, 5), (5, 5, 5)];
        assert_eq!(gradient_color(&stops, 0.125), (2, 2, 2));
    }

    #[test]
    fn test_hsv_matches_colorsys() {
        let (h, s, v) = rgb_to_hsv(1.0, 0.0, 0.0);
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));
        let (h, _, _) = rgb_to_hsv(0.0, 0.0, 1.0);
        assert!((h - 2.0 / 3.0).abs() < 1e-12);
        let (h, _, _) = rgb_to_hsv(1.0, 0.0, 1.0);
        assert!((h - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_reddish_detection() {
        assert!(is_reddish_or_pink(200, 30, 30));
        assert!(is_reddish_or_pink(255, 180, 200));
        assert!(is_reddish_or_pink(180, 40, 180));
        assert!(!is_reddish_or_pink(30, 200, 30));
        assert!(!is_reddish_or_pink(40, 60, 200));
        assert!(!is_reddish_or_pink(128, 128, 128));
    }

    #[test]
    fn test_map_pixel() {
        let p = palette("v7").unwrap();
        assert_eq!(p.map_pixel(Rgba([200, 30, 30, 0])), Rgba([0, 0, 0, 0]));
        assert_eq!(p.map_pixel(Rgba([30, 200, 30, 255])), Rgba([30, 200, 30, 255]));

        let Rgba([r, g, b, a]) = p.map_pixel(Rgba([200, 30, 30, 128]));
        assert_eq!(a, 128);
        assert!(b > r, "recoloured pixel should be blue: {:?}", (r, g, b));
    }

    #[test]
    fn test_paint_png_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tablet.png");

        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([220, 20, 60, 255]));
        img.put_pixel(1, 0, Rgba([10, 200, 10, 255]));
        img.save(&path).unwrap();

        let hits = palette("v7").unwrap().paint(&path, &path).unwrap();
        assert_eq!(hits, 1);

        let out = image::open(&path).unwrap().to_rgba8();
        let Rgba([r, _, b, _]) = *out.get_pixel(0, 0);
        assert!(b > r);
        assert_eq!(*out.get_pixel(1, 0), Rgba([10, 200, 10, 255]));
    }

    #[test]
    fn test_paint_missing_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("absent.png");
        assert!(matches!(
            palette("v7").unwrap().paint(&missing, &missing),
            Err(PatchError::MissingFile { .. })
        ));
    }
}
