// SPDX-License-Identifier: MPL-2.0
//! Palette values and extraction.
//!
//! A palette is a triple of color strings: primary, background, and
//! alternative. The editor treats them as opaque text (any non-empty string
//! is a valid value), while the extraction below always produces lowercase
//! `#rrggbb` strings.

use crate::config::defaults::{
    DEFAULT_ALTERNATIVE_COLOR, DEFAULT_BACKGROUND_COLOR, DEFAULT_COLOR,
};
use image_rs::DynamicImage;
use std::collections::HashMap;

/// Side length the source image is shrunk to before sampling. Keeps
/// extraction cheap for arbitrarily large covers.
const SAMPLE_EDGE: u32 = 64;

/// Minimum saturation for a bin to qualify as the primary color.
const MIN_PRIMARY_SATURATION: f32 = 0.15;

/// Minimum squared RGB distance between reported colors.
const MIN_COLOR_DISTANCE: u32 = 48 * 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub color: String,
    pub background_color: String,
    pub alternative_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            alternative_color: DEFAULT_ALTERNATIVE_COLOR.to_string(),
        }
    }
}

/// Derives a palette from decoded pixels by coarse color binning.
///
/// The most populous bin becomes the background, the most populous
/// sufficiently saturated bin distinct from it becomes the primary color,
/// and the next distinct bin becomes the alternative. Fully transparent
/// pixels are ignored; an image with no opaque pixels yields the default
/// palette.
pub fn extract(image: &DynamicImage) -> Palette {
    let sample = image.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE).to_rgba8();

    let mut bins: HashMap<u16, (u32, [u64; 3])> = HashMap::new();
    for pixel in sample.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < 128 {
            continue;
        }
        let key = (u16::from(r >> 5) << 6) | (u16::from(g >> 5) << 3) | u16::from(b >> 5);
        let entry = bins.entry(key).or_insert((0, [0; 3]));
        entry.0 += 1;
        entry.1[0] += u64::from(r);
        entry.1[1] += u64::from(g);
        entry.1[2] += u64::from(b);
    }

    let mut ranked: Vec<[u8; 3]> = {
        let mut entries: Vec<_> = bins.into_values().collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries
            .into_iter()
            .map(|(count, sums)| {
                let count = u64::from(count);
                [
                    (sums[0] / count) as u8,
                    (sums[1] / count) as u8,
                    (sums[2] / count) as u8,
                ]
            })
            .collect()
    };

    let Some(background) = ranked.first().copied() else {
        return Palette::default();
    };
    ranked.retain(|rgb| distance(*rgb, background) >= MIN_COLOR_DISTANCE);

    let color = ranked
        .iter()
        .copied()
        .find(|rgb| saturation(*rgb) >= MIN_PRIMARY_SATURATION)
        .or_else(|| ranked.first().copied());
    let alternative = color.and_then(|primary| {
        ranked
            .iter()
            .copied()
            .find(|rgb| distance(*rgb, primary) >= MIN_COLOR_DISTANCE)
    });

    Palette {
        color: color.map_or_else(|| DEFAULT_COLOR.to_string(), |rgb| to_hex(rgb)),
        background_color: to_hex(background),
        alternative_color: alternative
            .map_or_else(|| DEFAULT_ALTERNATIVE_COLOR.to_string(), |rgb| to_hex(rgb)),
    }
}

/// Formats an RGB triple as a lowercase `#rrggbb` string.
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Parses a `#rrggbb` string back into an RGB triple. Returns `None` for
/// anything else; the caller decides how to degrade.
pub fn parse_hex(value: &str) -> Option<[u8; 3]> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

fn saturation(rgb: [u8; 3]) -> f32 {
    let max = rgb.iter().copied().max().unwrap_or(0);
    let min = rgb.iter().copied().min().unwrap_or(0);
    if max == 0 {
        return 0.0;
    }
    f32::from(max - min) / f32::from(max)
}

fn distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = i32::from(*x) - i32::from(*y);
            (d * d) as u32
        })
        .sum()
}
