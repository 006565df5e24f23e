// SPDX-License-Identifier: MPL-2.0

//! Per-pixel color transforms
//!
//! Each function rewrites the RGB channels of a single `[r, g, b, a]` pixel
//! with no neighbour dependency. Alpha is never touched. Every write goes
//! through [`to_channel`], which rounds half-to-even and clamps to [0, 255].

use crate::constants::POSTERIZE_LEVELS;

/// Round and clamp a computed value into a channel byte
#[inline]
pub fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

#[inline]
fn scale(channel: u8, factor: f64) -> u8 {
    to_channel(channel as f64 * factor)
}

/// Which channel a tint boosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TintChannel {
    Red,
    Green,
    Blue,
}

#[inline]
pub fn grayscale(px: &mut [u8; 4]) {
    let sum = px[0] as f64 + px[1] as f64 + px[2] as f64;
    let avg = to_channel(sum / 3.0);
    px[0] = avg;
    px[1] = avg;
    px[2] = avg;
}

#[inline]
pub fn invert(px: &mut [u8; 4]) {
    px[0] = 255 - px[0];
    px[1] = 255 - px[1];
    px[2] = 255 - px[2];
}

#[inline]
pub fn sepia(px: &mut [u8; 4]) {
    let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
    px[0] = to_channel(0.393 * r + 0.769 * g + 0.189 * b);
    px[1] = to_channel(0.349 * r + 0.686 * g + 0.168 * b);
    px[2] = to_channel(0.272 * r + 0.534 * g + 0.131 * b);
}

/// Boost one channel by 1.5 and halve the other two
#[inline]
pub fn tint(px: &mut [u8; 4], channel: TintChannel) {
    let boosted = match channel {
        TintChannel::Red => 0,
        TintChannel::Green => 1,
        TintChannel::Blue => 2,
    };
    for (i, value) in px.iter_mut().take(3).enumerate() {
        let factor = if i == boosted { 1.5 } else { 0.5 };
        *value = scale(*value, factor);
    }
}

/// Sepia, then R and G pushed up by 10% and B pulled down by 10%
#[inline]
pub fn vintage(px: &mut [u8; 4]) {
    sepia(px);
    px[0] = scale(px[0], 1.1);
    px[1] = scale(px[1], 1.1);
    px[2] = scale(px[2], 0.9);
}

/// Brighten by 1.5; pixels with any channel above 200 get a further 1.2
#[inline]
pub fn neon(px: &mut [u8; 4]) {
    px[0] = scale(px[0], 1.5);
    px[1] = scale(px[1], 1.5);
    px[2] = scale(px[2], 1.5);

    if px[0] > 200 || px[1] > 200 || px[2] > 200 {
        px[0] = scale(px[0], 1.2);
        px[1] = scale(px[1], 1.2);
        px[2] = scale(px[2], 1.2);
    }
}

/// Snap each channel to the nearest of four evenly spaced levels
#[inline]
pub fn posterize(px: &mut [u8; 4]) {
    let step = 255.0 / (POSTERIZE_LEVELS - 1) as f64;
    for value in px.iter_mut().take(3) {
        // Level index rounds half away from zero
        *value = to_channel((*value as f64 / step).round() * step);
    }
}

#[inline]
pub fn warm(px: &mut [u8; 4]) {
    px[0] = scale(px[0], 1.2);
    px[1] = scale(px[1], 1.1);
    px[2] = scale(px[2], 0.9);
}

#[inline]
pub fn cool(px: &mut [u8; 4]) {
    px[0] = scale(px[0], 0.9);
    px[1] = scale(px[1], 1.1);
    px[2] = scale(px[2], 1.2);
}

/// Fully saturated, full value RGB for `hue` in degrees
///
/// Standard six-sector HSV conversion with s = v = 1.
pub fn hue_to_rgb(hue: u32) -> [u8; 3] {
    let h = (hue % 360) as f64 / 60.0;
    let c = 1.0;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [to_channel(r * 255.0), to_channel(g * 255.0), to_channel(b * 255.0)]
}
