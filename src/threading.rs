use std::num::NonZeroU32;
use std::ops::Range;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Contiguous half-open range of image rows `[start, start + size)`
/// processed by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub start: u32,
    pub size: u32,
}

impl RowBand {
    pub const fn new(start: u32, size: u32) -> Self {
        Self { start, size }
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn rows(&self) -> Range<u32> {
        self.start..self.end()
    }
}

/// Splits `height` rows of image into `num_parts` bands.
///
/// All bands except the last one have `ceil(height / num_parts)` rows,
/// or fewer if the image has run out of rows. The last band takes the rest.
/// Bands may be empty if `height` is less than `num_parts`, but together
/// they always cover every row exactly once.
pub fn row_bands(height: u32, num_parts: NonZeroU32) -> Vec<RowBand> {
    let num_parts = num_parts.get();
    let step = height.div_ceil(num_parts);
    let mut bands = Vec::with_capacity(num_parts as usize);
    let mut start = 0;
    for i in 0..num_parts {
        let size = if i == num_parts - 1 {
            height - start
        } else {
            step.min(height - start)
        };
        bands.push(RowBand::new(start, size));
        start += size;
    }
    bands
}

/// Builds a dedicated pool with exactly `num_threads` threads.
pub(crate) fn build_thread_pool(
    num_threads: usize,
    name: &'static str,
) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(move |i| format!("{name}-{i}"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nonzero(v: u32) -> NonZeroU32 {
        NonZeroU32::new(v).unwrap()
    }

    fn assert_exact_coverage(height: u32, bands: &[RowBand]) {
        let mut covered = vec![0u8; height as usize];
        for band in bands {
            for y in band.rows() {
                covered[y as usize] += 1;
            }
        }
        assert!(
            covered.iter().all(|&c| c == 1),
            "height={height}, bands={bands:?}"
        );
    }

    #[test]
    fn bands_cover_all_rows_once() {
        for height in [0, 1, 3, 4, 7, 100] {
            for num_parts in [1, 4, height, height + 1] {
                let Some(num_parts) = NonZeroU32::new(num_parts) else {
                    continue;
                };
                let bands = row_bands(height, num_parts);
                assert_eq!(bands.len(), num_parts.get() as usize);
                assert_exact_coverage(height, &bands);
            }
        }
    }

    #[test]
    fn evenly_divisible_height() {
        let bands = row_bands(100, nonzero(4));
        assert_eq!(
            bands,
            vec![
                RowBand::new(0, 25),
                RowBand::new(25, 25),
                RowBand::new(50, 25),
                RowBand::new(75, 25),
            ]
        );
    }

    #[test]
    fn last_band_takes_the_rest() {
        let bands = row_bands(7, nonzero(4));
        assert_eq!(
            bands,
            vec![
                RowBand::new(0, 2),
                RowBand::new(2, 2),
                RowBand::new(4, 2),
                RowBand::new(6, 1),
            ]
        );
        let bands = row_bands(10, nonzero(4));
        assert_eq!(bands[3], RowBand::new(9, 1));
    }

    #[test]
    fn more_parts_than_rows() {
        let bands = row_bands(3, nonzero(4));
        assert_eq!(bands.iter().filter(|b| b.is_empty()).count(), 1);
        assert_eq!(bands[3], RowBand::new(3, 0));

        let bands = row_bands(0, nonzero(4));
        assert!(bands.iter().all(|b| b.is_empty()));
    }

    #[test]
    fn thread_pool_has_requested_size() {
        let pool = build_thread_pool(3, "test").unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }
}
