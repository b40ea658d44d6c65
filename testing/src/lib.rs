use std::fs;
use std::num::NonZeroU32;
use std::path::PathBuf;

use fast_laplacian::{Image, U8x3};

pub fn nonzero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap()
}

/// Image filled by pseudo-random pixels, the same for the same seed.
pub fn noise_image(width: u32, height: u32, seed: u32) -> Image {
    let mut state = seed.wrapping_mul(2654435761).max(1);
    let pixels = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            U8x3::new(r, g, b)
        })
        .collect();
    Image::from_pixels(width, height, pixels).unwrap()
}

/// Image with black and white pixels placed like on a chessboard.
pub fn chessboard_image(width: u32, height: u32) -> Image {
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| U8x3::splat(if (x + y) % 2 == 0 { 255 } else { 0 })))
        .collect();
    Image::from_pixels(width, height, pixels).unwrap()
}

pub fn image_checksum(image: &Image) -> [u64; 3] {
    let mut res = [0u64; 3];
    for pixel in image.pixels() {
        res.iter_mut().zip(pixel.0).for_each(|(d, s)| *d += s as u64);
    }
    res
}

/// Empty directory for files created by a test.
pub fn work_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "fast_laplacian-{}-{}",
        name,
        std::process::id()
    ));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}
