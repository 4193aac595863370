//! RGBA8 pixel buffer.
//!
//! Row-major, four bytes per pixel, sized once at construction. Effects write
//! into it every frame; the host blits [`PixelBuffer::as_bytes`] unchanged.

use crate::color::PackedRgba;

/// Bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Fixed-size RGBA surface.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            data: vec![0; size],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: PackedRgba) {
        let px = [color.r(), color.g(), color.b(), color.a()];
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Set a pixel at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: PackedRgba) {
        if x < self.width && y < self.height {
            let j = self.offset(x, y);
            self.data[j..j + BYTES_PER_PIXEL]
                .copy_from_slice(&[color.r(), color.g(), color.b(), color.a()]);
        }
    }

    /// Get a pixel at (x, y); out of bounds reads as transparent.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> PackedRgba {
        if x < self.width && y < self.height {
            let j = self.offset(x, y);
            PackedRgba::rgba(
                self.data[j],
                self.data[j + 1],
                self.data[j + 2],
                self.data[j + 3],
            )
        } else {
            PackedRgba::TRANSPARENT
        }
    }

    /// Mutable view of row `y` (`width * 4` bytes).
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Raw RGBA bytes, ready for the host to blit.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}
