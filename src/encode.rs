use std::{
    io::{BufWriter, Write},
    path::Path,
};

use image::DynamicImage;
use tempfile::NamedTempFile;

use crate::{encoders, error::FileError, format::OutputFormat};

/// Encodes `image` and places it at `path`, replacing whatever was there.
///
/// The data is first written to a temporary file next to `path` and then renamed over it,
/// so a failed encode never leaves a truncated file at the destination.
pub fn encode(
    image: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: Option<u8>,
) -> Result<(), FileError> {
    let write_err = |source| FileError::Write {
        path: path.to_owned(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file = NamedTempFile::new_in(dir).map_err(write_err)?;
    // Wrap in BufWriter for performance
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Png => encoders::png::encode(image, &mut writer, quality)?,
        OutputFormat::Jpeg => encoders::jpeg::encode(image, &mut writer, quality)?,
        OutputFormat::Bmp => encoders::bmp::encode(image, &mut writer)?,
    }

    // Dropping the BufWriter would flush it too, but would swallow the error
    writer.flush().map_err(write_err)?;
    let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        std::fs::write(&path, b"stale").unwrap();

        encode(&DynamicImage::new_rgb8(6, 5), &path, OutputFormat::Bmp, None).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (6, 5));
        // only the output itself is left behind, no temporary files
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("out.png");
        let err = encode(&DynamicImage::new_rgb8(1, 1), &path, OutputFormat::Png, None).unwrap_err();
        assert!(matches!(err, FileError::Write { .. }));
    }
}
