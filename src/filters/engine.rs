// SPDX-License-Identifier: MPL-2.0

//! Filter dispatch
//!
//! Maps a [`FilterType`] to its transform and runs it in place over a
//! [`PixelBuffer`]. Nothing here can fail: unknown ids are a no-op and every
//! channel write is clamped.

use super::buffer::PixelBuffer;
use super::catalog::FilterType;
use super::point::{self, TintChannel};
use super::spatial;
use tracing::trace;

/// Apply `filter` to `buffer` in place and hand the same buffer back
pub fn apply_filter(buffer: &mut PixelBuffer, filter: FilterType) -> &mut PixelBuffer {
    trace!(
        filter = %filter,
        width = buffer.width(),
        height = buffer.height(),
        "Applying filter"
    );

    match filter {
        FilterType::Standard => {}
        FilterType::Grayscale => for_each_pixel(buffer, point::grayscale),
        FilterType::Invert => for_each_pixel(buffer, point::invert),
        FilterType::Sepia => for_each_pixel(buffer, point::sepia),
        FilterType::Red => for_each_pixel(buffer, |px| point::tint(px, TintChannel::Red)),
        FilterType::Green => for_each_pixel(buffer, |px| point::tint(px, TintChannel::Green)),
        FilterType::Blue => for_each_pixel(buffer, |px| point::tint(px, TintChannel::Blue)),
        FilterType::Vintage => for_each_pixel(buffer, point::vintage),
        FilterType::Neon => for_each_pixel(buffer, point::neon),
        FilterType::Posterize => for_each_pixel(buffer, point::posterize),
        FilterType::Warm => for_each_pixel(buffer, point::warm),
        FilterType::Cool => for_each_pixel(buffer, point::cool),
        FilterType::Rainbow => spatial::rainbow(buffer),
        FilterType::Pixelate => spatial::pixelate(buffer),
        FilterType::Mirror => spatial::mirror(buffer),
        FilterType::Blur => spatial::blur(buffer),
        FilterType::Emboss => spatial::emboss(buffer),
        FilterType::Sketch => spatial::sketch(buffer),
    }

    buffer
}

/// Apply a filter named by its selector id
///
/// Unrecognised ids leave the buffer untouched.
pub fn apply_filter_by_id<'a>(buffer: &'a mut PixelBuffer, id: &str) -> &'a mut PixelBuffer {
    match FilterType::from_id(id) {
        Some(filter) => apply_filter(buffer, filter),
        None => {
            trace!(id, "Unknown filter id, leaving frame unchanged");
            buffer
        }
    }
}

#[inline]
fn for_each_pixel<F>(buffer: &mut PixelBuffer, f: F)
where
    F: Fn(&mut [u8; 4]),
{
    buffer.pixels_mut().iter_mut().for_each(f);
}
