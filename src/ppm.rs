//! Reading and writing of binary PPM (`P6`) images.
//!
//! Only images with max color value equal to 255 are supported,
//! so every pixel component occupies exactly one byte.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageDecoder, ImageEncoder, ImageError};

use crate::{Image, PpmError};

const SUBTYPE: PnmSubtype = PnmSubtype::Pixmap(SampleEncoding::Binary);
/// The only supported max value of pixel components.
pub const MAX_COLOR_VALUE: u32 = 255;

/// Opens file with given path and decodes the image from it.
pub fn open(path: impl AsRef<Path>) -> Result<Image, PpmError> {
    let file = File::open(path)?;
    read(BufReader::new(file))
}

/// Decodes an image from a reader.
///
/// Header fields are separated by any whitespaces, `#` starts a comment
/// that lasts until the end of line. Data after the last pixel is ignored.
pub fn read(reader: impl BufRead) -> Result<Image, PpmError> {
    let decoder = PnmDecoder::new(reader).map_err(decoding_error)?;
    let header = decoder.header();
    let subtype = header.subtype();
    if subtype != SUBTYPE {
        return Err(PpmError::UnsupportedFormat(subtype));
    }
    let max_value = header.maximal_sample();
    if max_value != MAX_COLOR_VALUE {
        return Err(PpmError::InvalidMaxValue(max_value));
    }

    let (width, height) = decoder.dimensions();
    let mut image = Image::try_new(width, height)?;
    decoder
        .read_image(image.buffer_mut())
        .map_err(decoding_error)?;
    Ok(image)
}

/// Creates file with given path and encodes the image into it.
pub fn save(image: &Image, path: impl AsRef<Path>) -> Result<(), PpmError> {
    let file = File::create(path)?;
    write(image, BufWriter::new(file))
}

/// Encodes the image into a writer.
pub fn write(image: &Image, mut writer: impl Write) -> Result<(), PpmError> {
    PnmEncoder::new(&mut writer)
        .with_subtype(SUBTYPE)
        .write_image(
            image.buffer(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(encoding_error)?;
    writer.flush()?;
    Ok(())
}

fn decoding_error(err: ImageError) -> PpmError {
    match err {
        ImageError::IoError(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            PpmError::UnexpectedEof
        }
        ImageError::IoError(err) => PpmError::Io(err),
        err => PpmError::Decoding(err),
    }
}

fn encoding_error(err: ImageError) -> PpmError {
    match err {
        ImageError::IoError(err) => PpmError::Io(err),
        err => PpmError::Encoding(err),
    }
}
