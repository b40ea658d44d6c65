use crate::convolution::laplacian_pixel;
use crate::pixels::U8x3;
use crate::threading::RowBand;
use crate::Image;

/// Filters rows of `band` from the source image into `dst_rows`.
///
/// `dst_rows` must contain exactly the pixels of the band rows
/// of a destination image with the same width as the source image.
pub fn filter_band(src: &Image, band: RowBand, dst_rows: &mut [U8x3]) {
    let width = src.width() as usize;
    assert_eq!(dst_rows.len(), band.size as usize * width);
    if width == 0 {
        return;
    }
    for (y, dst_row) in band.rows().zip(dst_rows.chunks_exact_mut(width)) {
        for (x, dst_pixel) in dst_row.iter_mut().enumerate() {
            *dst_pixel = laplacian_pixel(src, x as u32, y);
        }
    }
}
