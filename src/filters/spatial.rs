// SPDX-License-Identifier: MPL-2.0

//! Position- and neighbourhood-dependent transforms
//!
//! Mirror, blur, emboss and sketch read from a
//! [`Snapshot`](super::buffer::Snapshot) taken before the pass starts so that
//! already-written output never feeds back into later pixels. Blur, emboss
//! and sketch only rewrite interior pixels; the one-pixel border keeps its
//! incoming value.

use super::buffer::PixelBuffer;
use super::point::{self, to_channel};
use crate::constants::PIXELATE_BLOCK_SIZE;

/// Fill each block with the color of its top-left pixel
///
/// Blocks on the right and bottom edges are clipped to the raster, so a
/// partial block never spills into the next row or past the end of the data.
pub fn pixelate(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let pixels = buffer.pixels_mut();

    for block_y in (0..height).step_by(PIXELATE_BLOCK_SIZE) {
        for block_x in (0..width).step_by(PIXELATE_BLOCK_SIZE) {
            let [r, g, b, _] = pixels[block_y * width + block_x];
            let y_end = (block_y + PIXELATE_BLOCK_SIZE).min(height);
            let x_end = (block_x + PIXELATE_BLOCK_SIZE).min(width);

            for y in block_y..y_end {
                for px in &mut pixels[y * width + block_x..y * width + x_end] {
                    px[0] = r;
                    px[1] = g;
                    px[2] = b;
                }
            }
        }
    }
}

/// Horizontal flip, alpha included
pub fn mirror(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let snapshot = buffer.snapshot();
    let pixels = buffer.pixels_mut();

    for y in 0..height {
        for x in 0..width {
            pixels[y * width + x] = snapshot.at(width - 1 - x, y);
        }
    }
}

/// 3x3 unweighted box blur over interior pixels
pub fn blur(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width < 3 || height < 3 {
        return;
    }
    let snapshot = buffer.snapshot();
    let pixels = buffer.pixels_mut();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = [0u32; 3];
            for sy in y - 1..=y + 1 {
                for sx in x - 1..=x + 1 {
                    let src = snapshot.at(sx, sy);
                    sum[0] += src[0] as u32;
                    sum[1] += src[1] as u32;
                    sum[2] += src[2] as u32;
                }
            }
            let px = &mut pixels[y * width + x];
            for c in 0..3 {
                px[c] = to_channel(sum[c] as f64 / 9.0);
            }
        }
    }
}

/// Relief from the top-left to bottom-right difference, biased to mid-gray
pub fn emboss(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width < 3 || height < 3 {
        return;
    }
    let snapshot = buffer.snapshot();
    let pixels = buffer.pixels_mut();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let top_left = snapshot.at(x - 1, y - 1);
            let bottom_right = snapshot.at(x + 1, y + 1);
            let px = &mut pixels[y * width + x];
            for c in 0..3 {
                let value = 128 + top_left[c] as i32 - bottom_right[c] as i32;
                px[c] = value.clamp(0, 255) as u8;
            }
        }
    }
}

/// Grayscale, then invert the cross-shaped gradient magnitude
pub fn sketch(buffer: &mut PixelBuffer) {
    buffer.pixels_mut().iter_mut().for_each(point::grayscale);

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width < 3 || height < 3 {
        return;
    }
    let snapshot = buffer.snapshot();
    let pixels = buffer.pixels_mut();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let top = snapshot.at(x, y - 1)[0] as i32;
            let bottom = snapshot.at(x, y + 1)[0] as i32;
            let left = snapshot.at(x - 1, y)[0] as i32;
            let right = snapshot.at(x + 1, y)[0] as i32;

            let diff = (top - bottom).abs() + (left - right).abs();
            let value = (255 - diff.min(255)) as u8;

            let px = &mut pixels[y * width + x];
            px[0] = value;
            px[1] = value;
            px[2] = value;
        }
    }
}

/// Replace every pixel with a hue keyed on `(x + y) mod 360`
pub fn rainbow(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    if width == 0 {
        return;
    }

    for (i, px) in buffer.pixels_mut().iter_mut().enumerate() {
        let x = i % width;
        let y = i / width;
        let [r, g, b] = point::hue_to_rgb(((x + y) % 360) as u32);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = (x * 16 + y * 3) as u8;
                buffer.set_pixel(x, y, [v, v / 2, 255 - v, 200]);
            }
        }
        buffer
    }

    #[test]
    fn test_pixelate_fills_full_blocks() {
        let mut buffer = gradient(16, 8);
        let first = buffer.pixel(0, 0).unwrap();
        let second = buffer.pixel(8, 0).unwrap();
        pixelate(&mut buffer);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(buffer.pixel(x, y).unwrap(), first);
                assert_eq!(buffer.pixel(x + 8, y).unwrap(), second);
            }
        }
    }

    #[test]
    fn test_pixelate_clips_partial_edge_blocks() {
        // 10 wide: the second block column only covers x = 8..10
        let mut buffer = gradient(10, 10);
        let original = buffer.clone();
        pixelate(&mut buffer);

        let edge = original.pixel(8, 0).unwrap();
        assert_eq!(buffer.pixel(9, 7).unwrap(), edge);

        // Row 1 must still start with the (0, 0) block color, not the spill of
        // the right edge block from row 0
        assert_eq!(buffer.pixel(0, 1).unwrap(), original.pixel(0, 0).unwrap());

        // Bottom partial row takes the color of (0, 8)
        assert_eq!(buffer.pixel(3, 9).unwrap(), original.pixel(0, 8).unwrap());
        assert_eq!(buffer.as_bytes().len(), original.as_bytes().len());
    }

    #[test]
    fn test_mirror_flips_rows() {
        let mut buffer = PixelBuffer::new(3, 1);
        buffer.set_pixel(0, 0, [1, 1, 1, 10]);
        buffer.set_pixel(1, 0, [2, 2, 2, 20]);
        buffer.set_pixel(2, 0, [3, 3, 3, 30]);
        mirror(&mut buffer);
        assert_eq!(buffer.pixel(0, 0), Some([3, 3, 3, 30]));
        assert_eq!(buffer.pixel(1, 0), Some([2, 2, 2, 20]));
        assert_eq!(buffer.pixel(2, 0), Some([1, 1, 1, 10]));
    }

    #[test]
    fn test_blur_center_mean() {
        let mut buffer = PixelBuffer::filled(3, 3, [0, 0, 0, 255]);
        buffer.set_pixel(1, 1, [90, 180, 9, 255]);
        blur(&mut buffer);
        assert_eq!(buffer.pixel(1, 1), Some([10, 20, 1, 255]));
        assert_eq!(buffer.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_emboss_diagonal_difference() {
        let mut buffer = PixelBuffer::filled(3, 3, [100, 100, 100, 255]);
        buffer.set_pixel(0, 0, [250, 0, 100, 255]);
        buffer.set_pixel(2, 2, [0, 250, 100, 255]);
        emboss(&mut buffer);
        // 128 + 250 clamps high, 128 - 250 clamps low, equal stays mid-gray
        assert_eq!(buffer.pixel(1, 1), Some([255, 0, 128, 255]));
        assert_eq!(buffer.pixel(0, 0), Some([250, 0, 100, 255]));
    }

    #[test]
    fn test_sketch_flat_image_is_white_inside() {
        let mut buffer = PixelBuffer::filled(4, 4, [30, 60, 90, 255]);
        sketch(&mut buffer);
        assert_eq!(buffer.pixel(1, 1), Some([255, 255, 255, 255]));
        // Border keeps the grayscale value
        assert_eq!(buffer.pixel(0, 0), Some([60, 60, 60, 255]));
    }

    #[test]
    fn test_small_buffers_skip_neighbourhood_pass() {
        let mut buffer = gradient(2, 2);
        let original = buffer.clone();
        blur(&mut buffer);
        emboss(&mut buffer);
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_rainbow_keeps_alpha() {
        let mut buffer = PixelBuffer::filled(2, 2, [7, 7, 7, 33]);
        rainbow(&mut buffer);
        assert_eq!(buffer.pixel(0, 0), Some([255, 0, 0, 33]));
        // hue 1 at (1, 0): 1/60 of the way from red to yellow
        assert_eq!(buffer.pixel(1, 0), Some([255, 4, 0, 33]));
    }
}
