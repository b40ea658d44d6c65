use std::mem;

use crate::pixels::U8x3;
use crate::threading::RowBand;
use crate::ImageBufferError;

mod image_crate;

/// Owned RGB image with pixels stored in row-major (scanline) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<U8x3>,
}

impl Image {
    /// Create a black image with given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if memory for pixels can't be allocated.
    /// Use [Image::try_new] to handle this case.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels_count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![U8x3::default(); pixels_count],
        }
    }

    /// Create a black image with given dimensions without aborting
    /// the process if memory can't be allocated.
    pub fn try_new(width: u32, height: u32) -> Result<Self, ImageBufferError> {
        let pixels_count = pixels_count(width, height)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(pixels_count)
            .map_err(|_| ImageBufferError::AllocationFailed(pixels_count))?;
        pixels.resize(pixels_count, U8x3::default());
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image from vector with pixels.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<U8x3>,
    ) -> Result<Self, ImageBufferError> {
        if pixels.len() != width as usize * height as usize {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image from raw bytes, three bytes (r, g, b) per pixel.
    pub fn from_vec_u8(
        width: u32,
        height: u32,
        buffer: Vec<u8>,
    ) -> Result<Self, ImageBufferError> {
        let size = width as usize * height as usize * size_of::<U8x3>();
        if buffer.len() != size {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        let pixels = bytemuck::cast_slice::<u8, U8x3>(&buffer).to_vec();
        Self::from_pixels(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Buffer with image pixels data.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Mutable buffer with image pixels data.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    #[inline]
    pub fn pixels(&self) -> &[U8x3] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [U8x3] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<U8x3> {
        self.pixels
    }

    /// Returns pixel with given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of image boundaries.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> U8x3 {
        assert!(x < self.width && y < self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Returns row of pixels with given index.
    #[inline]
    pub fn row(&self, y: u32) -> &[U8x3] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.pixels[start..start + width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[U8x3]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Split image into disjoint mutable parts, one part per row band.
    ///
    /// Bands must follow each other without gaps, starting from the first
    /// row and ending at the last one. Otherwise `None` is returned.
    pub fn split_rows_mut(&mut self, bands: &[RowBand]) -> Option<Vec<&mut [U8x3]>> {
        let width = self.width as usize;
        let mut next_row = 0;
        let mut rest = self.pixels.as_mut_slice();
        let mut parts = Vec::with_capacity(bands.len());
        for band in bands {
            if band.start != next_row || band.end() > self.height {
                return None;
            }
            let (part, tail) = mem::take(&mut rest).split_at_mut(band.size as usize * width);
            parts.push(part);
            rest = tail;
            next_row = band.end();
        }
        if next_row != self.height {
            return None;
        }
        Some(parts)
    }
}

fn pixels_count(width: u32, height: u32) -> Result<usize, ImageBufferError> {
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(ImageBufferError::AllocationFailed(usize::MAX))?;
    if count.checked_mul(size_of::<U8x3>()).is_none() {
        return Err(ImageBufferError::AllocationFailed(count));
    }
    Ok(count)
}
