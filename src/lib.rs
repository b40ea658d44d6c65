#![doc = include_str!("../README.md")]

pub use convolution::{clamp_component, filter_band, laplacian_pixel, LAPLACIAN_KERNEL};
pub use errors::*;
pub use filter::{FilterOptions, Filtered, ImageFilter, LaplacianFilter, DEFAULT_WORKERS};
pub use job::{run_jobs, Job, JobState, RunSummary, TimeAccumulator};
pub use pixels::U8x3;
pub use threading::{row_bands, RowBand};

pub use crate::image::Image;

mod convolution;
mod errors;
mod filter;
mod image;
pub mod job;
pub mod pixels;
pub mod ppm;
mod threading;
