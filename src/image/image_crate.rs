use image::{ImageBuffer, Rgb, RgbImage};

use crate::pixels::U8x3;
use crate::Image;

impl From<&RgbImage> for Image {
    fn from(img: &RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| U8x3(p.0)).collect(),
        }
    }
}

impl From<&Image> for RgbImage {
    fn from(img: &Image) -> Self {
        ImageBuffer::from_fn(img.width(), img.height(), |x, y| Rgb(img.pixel(x, y).0))
    }
}
