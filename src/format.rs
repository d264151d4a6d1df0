//! Input and output image formats recognised by the batch converter.

use std::{fmt::Display, path::Path};

use image::ImageFormat;
use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::error::BatchError;

/// Encodings a batch can be written in.
#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Extension given to converted files: the lowercase format name, so JPEG output ends in `.jpeg`.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stringified: &'static str = self.into();
        f.write_str(stringified)
    }
}

/// What to do when the requested output format is not one we can write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormatPolicy {
    /// Fall back to [`OutputFormat::Png`] and record a warning.
    #[default]
    Lenient,
    /// Refuse to start the batch.
    Strict,
}

/// Outcome of resolving a user-supplied format name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFormat {
    Exact(OutputFormat),
    Fallback(OutputFormat),
}

impl ResolvedFormat {
    pub fn format(&self) -> OutputFormat {
        match self {
            ResolvedFormat::Exact(format) | ResolvedFormat::Fallback(format) => *format,
        }
    }
}

pub fn resolve_output_format(
    requested: &str,
    policy: FormatPolicy,
) -> Result<ResolvedFormat, BatchError> {
    match OutputFormat::try_from(requested.trim()) {
        Ok(format) => Ok(ResolvedFormat::Exact(format)),
        Err(_) => match policy {
            FormatPolicy::Lenient => Ok(ResolvedFormat::Fallback(OutputFormat::default())),
            FormatPolicy::Strict => Err(BatchError::UnsupportedOutputFormat {
                requested: requested.to_owned(),
            }),
        },
    }
}

/// Formats picked up from the input directory, identified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
}

impl InputFormat {
    /// Matches the extension case-insensitively. Anything else is not an image we pick up.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "png" => Some(InputFormat::Png),
            "jpg" | "jpeg" => Some(InputFormat::Jpeg),
            "bmp" => Some(InputFormat::Bmp),
            "gif" => Some(InputFormat::Gif),
            _ => None,
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            InputFormat::Png => ImageFormat::Png,
            InputFormat::Jpeg => ImageFormat::Jpeg,
            InputFormat::Bmp => ImageFormat::Bmp,
            InputFormat::Gif => ImageFormat::Gif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck_macros::quickcheck;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(OutputFormat::try_from("png"), Ok(OutputFormat::Png));
        assert_eq!(OutputFormat::try_from("Jpeg"), Ok(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::try_from("BMP"), Ok(OutputFormat::Bmp));
        assert!(OutputFormat::try_from("jpg").is_err());
    }

    #[test]
    fn lenient_falls_back_to_png() {
        let resolved = resolve_output_format("TIFF", FormatPolicy::Lenient).unwrap();
        assert_eq!(resolved, ResolvedFormat::Fallback(OutputFormat::Png));
        let resolved = resolve_output_format(" jpeg ", FormatPolicy::Lenient).unwrap();
        assert_eq!(resolved, ResolvedFormat::Exact(OutputFormat::Jpeg));
    }

    #[test]
    fn strict_rejects_unknown_format() {
        let err = resolve_output_format("TIFF", FormatPolicy::Strict).unwrap_err();
        assert!(matches!(err, BatchError::UnsupportedOutputFormat { requested } if requested == "TIFF"));
    }

    #[test]
    fn display_matches_parser() {
        for format in OutputFormat::VARIANTS {
            assert_eq!(OutputFormat::try_from(format.to_string().as_str()), Ok(*format));
        }
    }

    #[test]
    fn input_extensions() {
        assert_eq!(InputFormat::from_path(Path::new("a/b.PNG")), Some(InputFormat::Png));
        assert_eq!(InputFormat::from_path(Path::new("photo.JpG")), Some(InputFormat::Jpeg));
        assert_eq!(InputFormat::from_path(Path::new("photo.jpeg")), Some(InputFormat::Jpeg));
        assert_eq!(InputFormat::from_path(Path::new("anim.gif")), Some(InputFormat::Gif));
        assert_eq!(InputFormat::from_path(Path::new("scan.tiff")), None);
        assert_eq!(InputFormat::from_path(Path::new("README")), None);
        assert_eq!(InputFormat::from_path(Path::new(".png")), None);
    }

    #[quickcheck]
    fn lenient_resolution_never_fails(requested: String) -> bool {
        resolve_output_format(&requested, FormatPolicy::Lenient).is_ok()
    }
}
