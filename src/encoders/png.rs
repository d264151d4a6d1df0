use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use crate::error::FileError;

pub fn encode<W: Write>(
    image: &DynamicImage,
    writer: &mut W,
    quality: Option<u8>,
) -> Result<(), FileError> {
    let (compression, filter) = quality_to_compression_parameters(quality);
    let encoder = PngEncoder::new_with_quality(writer, compression, filter);
    image.write_with_encoder(encoder).map_err(FileError::Encode)
}

// PNG is lossless, so "quality" follows the imagemagick convention:
// the tens digit is the zlib effort and the ones digit picks the row filter.
fn quality_to_compression_parameters(quality: Option<u8>) -> (CompressionType, FilterType) {
    let Some(quality) = quality else {
        return (CompressionType::Default, FilterType::Adaptive);
    };
    let compression = match quality / 10 {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    };
    let filter = match quality % 10 {
        0 => FilterType::NoFilter,
        1 => FilterType::Sub,
        2 => FilterType::Up,
        3 => FilterType::Avg,
        4 => FilterType::Paeth,
        _ => FilterType::Adaptive,
    };
    (compression, filter)
}
