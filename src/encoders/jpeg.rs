use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::FileError;

const DEFAULT_QUALITY: u8 = 92;

pub fn encode<W: Write>(
    image: &DynamicImage,
    writer: &mut W,
    quality: Option<u8>,
) -> Result<(), FileError> {
    let encoder = JpegEncoder::new_with_quality(writer, quality.unwrap_or(DEFAULT_QUALITY));
    // JPEG has no alpha channel, drop it instead of failing
    if image.color().has_alpha() {
        let opaque = DynamicImage::ImageRgb8(image.to_rgb8());
        opaque.write_with_encoder(encoder).map_err(FileError::Encode)
    } else {
        image.write_with_encoder(encoder).map_err(FileError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_alpha() {
        let mut out = Vec::new();
        encode(&DynamicImage::new_rgba8(4, 3), &mut out, None).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }
}
