use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use log::trace;

use crate::convolution::filter_band;
use crate::threading::{build_thread_pool, row_bands};
use crate::{FilterError, Image};

/// Count of workers used by default to filter one image.
pub const DEFAULT_WORKERS: NonZeroU32 = match NonZeroU32::new(4) {
    Some(v) => v,
    None => unreachable!(),
};

/// Options for configuring a filtering process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FilterOptions {
    pub workers: NonZeroU32,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set count of threads used to filter one image.
    ///
    /// Rows of an image are split into this number of bands,
    /// each band is processed by its own thread.
    pub fn workers(&self, workers: NonZeroU32) -> Self {
        let mut options = *self;
        options.workers = workers;
        options
    }
}

/// Result of filtering of one image.
#[derive(Debug)]
pub struct Filtered {
    pub image: Image,
    /// Wall-clock time spent by workers, from dispatching the first one
    /// to joining the last one.
    pub elapsed: Duration,
}

/// Filter applied by image jobs to every source image.
pub trait ImageFilter: Send + Sync {
    fn filter(&self, src: &Image) -> Result<Filtered, FilterError>;
}

/// Applies the Laplacian kernel to images using several threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct LaplacianFilter {
    options: FilterOptions,
}

impl LaplacianFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> FilterOptions {
        self.options
    }

    /// Filters the source image into a new image with the same dimensions.
    ///
    /// Result image is allocated before the time measurement starts.
    /// Building of the thread pool for workers is a part of dispatching,
    /// so it is included into [Filtered::elapsed]. If threads can't be
    /// started, nothing is run and the result image is dropped.
    ///
    /// The calling thread blocks until all workers are joined. It must not
    /// be a worker of another rayon pool, because such a thread executes
    /// pending tasks of its own pool while waiting.
    pub fn filter(&self, src: &Image) -> Result<Filtered, FilterError> {
        let mut dst = Image::try_new(src.width(), src.height()).map_err(FilterError::Allocation)?;
        let workers = self.options.workers;
        let bands = row_bands(src.height(), workers);

        let started = Instant::now();
        let pool = build_thread_pool(workers.get() as usize, "laplacian")
            .map_err(FilterError::Dispatch)?;
        let Some(parts) = dst.split_rows_mut(&bands) else {
            unreachable!("row bands must cover all rows of the image");
        };
        pool.scope(|s| {
            for (band, dst_rows) in bands.iter().copied().zip(parts) {
                trace!("Filter rows {:?}", band.rows());
                s.spawn(move |_| filter_band(src, band, dst_rows));
            }
        });
        let elapsed = started.elapsed();

        Ok(Filtered {
            image: dst,
            elapsed,
        })
    }
}

impl ImageFilter for LaplacianFilter {
    fn filter(&self, src: &Image) -> Result<Filtered, FilterError> {
        LaplacianFilter::filter(self, src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::U8x3;

    #[test]
    fn default_options() {
        let filter = LaplacianFilter::default();
        assert_eq!(filter.options().workers.get(), 4);
    }

    #[test]
    fn result_has_same_dimensions() {
        let src = Image::new(5, 3);
        let filtered = LaplacianFilter::default().filter(&src).unwrap();
        assert_eq!(filtered.image.width(), 5);
        assert_eq!(filtered.image.height(), 3);
    }

    #[test]
    fn empty_image() {
        let src = Image::new(0, 0);
        let filtered = LaplacianFilter::default().filter(&src).unwrap();
        assert!(filtered.image.buffer().is_empty());
    }

    #[test]
    fn elapsed_time_is_bounded_by_filter_call() {
        let src = Image::from_pixels(64, 48, vec![U8x3::new(1, 100, 200); 64 * 48]).unwrap();
        let filter = LaplacianFilter::new(FilterOptions::new().workers(NonZeroU32::MIN));
        let started = Instant::now();
        let filtered = filter.filter(&src).unwrap();
        assert!(filtered.elapsed <= started.elapsed());
    }

    #[test]
    fn uniform_image_filters_to_black() {
        let src = Image::from_pixels(4, 4, vec![U8x3::splat(50); 16]).unwrap();
        let filtered = LaplacianFilter::default().filter(&src).unwrap();
        assert!(filtered.image.buffer().iter().all(|&c| c == 0));
    }
}
