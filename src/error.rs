use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort the whole run before any file is converted.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid dimensions `{width}x{height}': width and height must be positive integers")]
    InvalidDimensions { width: String, height: String },

    #[error("input directory '{}' does not exist", .path.display())]
    MissingInputDirectory { path: PathBuf },

    #[error("input path '{}' exists but is not a directory", .path.display())]
    InputNotADirectory { path: PathBuf },

    #[error(
        "input directory '{}' did not exist and has been created; put images into it and run again",
        .path.display()
    )]
    InputDirectoryCreated { path: PathBuf },

    #[error("unsupported output format `{requested}': expected one of PNG, JPEG, BMP")]
    UnsupportedOutputFormat { requested: String },

    #[error("unable to create directory '{}': {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read input directory '{}': {source}", .path.display())]
    ReadInputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to convert a single file. Never aborts the batch.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unable to resize image: {0}")]
    Resize(String),

    #[error("unable to encode image: {0}")]
    Encode(image::ImageError),

    #[error("unable to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
