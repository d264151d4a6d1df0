use image::{DynamicImage, ImageReader, ImageResult};

use crate::scan::ImageFile;

/// Guesses the format from the file contents, falling back to the one implied by the extension.
///
/// The file is opened, read and closed within this call, whether decoding succeeds or not.
pub fn decode(file: &ImageFile) -> ImageResult<DynamicImage> {
    let mut decoder = ImageReader::open(&file.path)?.with_guessed_format()?;
    if decoder.format().is_none() {
        decoder.set_format(file.format.image_format());
    }
    decoder.decode()
}
