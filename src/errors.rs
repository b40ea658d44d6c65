use std::io;
use std::path::PathBuf;

use image::codecs::pnm::PnmSubtype;
use image::ImageError;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer don't match to image dimensions")]
    InvalidBufferSize,
    #[error("Unable to allocate memory for image with {0} pixels")]
    AllocationFailed(usize),
}

#[derive(Error, Debug)]
pub enum PpmError {
    #[error("Unsupported format {0:?}, only binary PPM (P6) images are supported")]
    UnsupportedFormat(PnmSubtype),
    #[error("Invalid max color value {0}, only 255 is supported")]
    InvalidMaxValue(u32),
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Invalid PNM image")]
    Decoding(#[source] ImageError),
    #[error("Unable to encode PPM image")]
    Encoding(#[source] ImageError),
    #[error(transparent)]
    ImageBuffer(#[from] ImageBufferError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unable to allocate memory for result image")]
    Allocation(#[source] ImageBufferError),
    #[error("Unable to start filter workers")]
    Dispatch(#[source] rayon::ThreadPoolBuildError),
}

/// Failure of one image job.
///
/// Only [JobError::Filter] is local to its job, all other
/// variants must terminate the whole run.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Unable to read image {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: PpmError,
    },
    #[error("Unable to filter image {path:?}")]
    Filter {
        path: PathBuf,
        #[source]
        source: FilterError,
    },
    #[error("Unable to write image {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: PpmError,
    },
    #[error("Unable to start thread for image job #{index}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Filter { .. })
    }
}
