// SPDX-License-Identifier: MPL-2.0

//! RGBA frame buffer shared by every filter

use crate::errors::{AppError, AppResult};

/// Row-major RGBA8 raster, 4 bytes per pixel, no row padding
///
/// Dimensions are fixed at construction. Filters borrow the buffer mutably
/// and rewrite it in place; nothing is retained between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed (transparent black) buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; Self::byte_len(width, height)],
        }
    }

    /// Create a buffer where every pixel is `rgba`
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut buffer = Self::new(width, height);
        buffer.pixels_mut().fill(rgba);
        buffer
    }

    /// Wrap existing RGBA bytes, checking `data.len() == width * height * 4`
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> AppResult<Self> {
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(AppError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// View the raster as one `[r, g, b, a]` element per pixel
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Pixel at column `x`, row `y`; `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels()[y as usize * self.width as usize + x as usize])
    }

    /// Overwrite one pixel; writes outside the raster are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let width = self.width as usize;
            self.pixels_mut()[y as usize * width + x as usize] = rgba;
        }
    }

    /// Immutable copy of the current pixels for filters that read neighbours
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width as usize,
            pixels: self.pixels().to_vec(),
        }
    }

    /// Give up the buffer and return its raw RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Frozen copy of a buffer's pixels taken before an in-place pass
pub struct Snapshot {
    width: usize,
    pixels: Vec<[u8; 4]>,
}

impl Snapshot {
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> [u8; 4] {
        self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_size() {
        let buffer = PixelBuffer::new(3, 2);
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(buffer.stride(), 12);
        assert_eq!(buffer.pixels().len(), 6);
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            AppError::BufferSize {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_pixel_addressing() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.set_pixel(3, 2, [1, 2, 3, 4]);
        assert_eq!(buffer.pixel(3, 2), Some([1, 2, 3, 4]));
        assert_eq!(&buffer.as_bytes()[44..48], &[1, 2, 3, 4]);
        assert_eq!(buffer.pixel(4, 0), None);

        // Out of range writes are dropped
        buffer.set_pixel(9, 9, [9, 9, 9, 9]);
        assert_eq!(buffer.as_bytes().iter().filter(|&&b| b == 9).count(), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut buffer = PixelBuffer::filled(2, 2, [10, 20, 30, 255]);
        let snapshot = buffer.snapshot();
        buffer.set_pixel(0, 0, [0, 0, 0, 0]);
        assert_eq!(snapshot.at(0, 0), [10, 20, 30, 255]);
    }
}
