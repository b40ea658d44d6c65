//! Laplacian convolution of RGB images.
//!
//! The kernel is applied with toroidal wrap-around: neighbours of border
//! pixels are taken from the opposite edge of the image.
pub use native::filter_band;

use crate::pixels::U8x3;
use crate::Image;

mod native;

/// Width and height of the kernel.
pub const KERNEL_SIZE: usize = 3;

/// Discrete Laplacian with 8 in the center. Sum of all weights is zero,
/// so flat regions of an image produce zero response.
pub const LAPLACIAN_KERNEL: [[i32; KERNEL_SIZE]; KERNEL_SIZE] = [
    [-1, -1, -1],
    [-1, 8, -1],
    [-1, -1, -1],
];

const RADIUS: usize = KERNEL_SIZE / 2;

/// Computes the filtered value of the source pixel with coordinates `(x, y)`.
///
/// # Panics
///
/// Panics if coordinates are out of image boundaries.
pub fn laplacian_pixel(src: &Image, x: u32, y: u32) -> U8x3 {
    let width = src.width() as usize;
    let height = src.height() as usize;
    assert!((x as usize) < width && (y as usize) < height);
    let pixels = src.pixels();

    let mut sums = [0i32; 3];
    for (fy, kernel_row) in LAPLACIAN_KERNEL.iter().enumerate() {
        let src_y = (y as usize + height + fy - RADIUS) % height;
        let src_row = &pixels[src_y * width..(src_y + 1) * width];
        for (fx, &weight) in kernel_row.iter().enumerate() {
            let src_x = (x as usize + width + fx - RADIUS) % width;
            for (sum, &c) in sums.iter_mut().zip(&src_row[src_x].0) {
                *sum += c as i32 * weight;
            }
        }
    }
    U8x3(sums.map(clamp_component))
}

/// Saturates accumulated value into the range of `u8`.
#[inline(always)]
pub fn clamp_component(v: i32) -> u8 {
    v.clamp(0, u8::MAX as i32) as u8
}
