use std::io::Write;

use image::codecs::bmp::BmpEncoder;
use image::DynamicImage;

use crate::error::FileError;

pub fn encode<W: Write>(image: &DynamicImage, writer: &mut W) -> Result<(), FileError> {
    let encoder = BmpEncoder::new(writer);
    image.write_with_encoder(encoder).map_err(FileError::Encode)
}
