use std::path::{Path, PathBuf};

use crate::{error::BatchError, format::InputFormat};

/// An image discovered in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub format: InputFormat,
}

/// Lists the images directly under `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Entries with an unrecognised
/// extension, and entries that are not regular files, are skipped.
pub fn discover(dir: &Path) -> Result<Vec<ImageFile>, BatchError> {
    let read_err = |source| BatchError::ReadInputDirectory {
        path: dir.to_owned(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        let Some(format) = InputFormat::from_path(&path) else {
            log::debug!("skipping '{}': not a recognised image extension", path.display());
            continue;
        };
        // follows symlinks, so a link to an image is picked up
        if !path.is_file() {
            log::debug!("skipping '{}': not a regular file", path.display());
            continue;
        }
        files.push(ImageFile { path, format });
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.JPG", "a.png", "notes.txt", "c.gif", "d.tiff", "e.bmp", "f.jpeg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("inner.png"), b"").unwrap();

        let found = discover(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.png", "b.JPG", "c.gif", "e.bmp", "f.jpeg"]);
        assert_eq!(found[1].format, InputFormat::Jpeg);
        assert_eq!(found[2].format, InputFormat::Gif);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, BatchError::ReadInputDirectory { .. }));
    }
}
