use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::{
    dimensions::Dimensions,
    error::BatchError,
    filter::Filter,
    format::{resolve_output_format, FormatPolicy, OutputFormat, ResolvedFormat},
};

/// What to do when the input directory does not exist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MissingInputPolicy {
    /// Abort with [`BatchError::MissingInputDirectory`].
    #[default]
    Fail,
    /// Create the directory so the user has somewhere to put images,
    /// then abort with [`BatchError::InputDirectoryCreated`].
    CreateAndAbort,
}

/// Non-fatal problems noticed while preparing or planning a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnsupportedOutputFormat {
        requested: String,
        fallback: OutputFormat,
    },
    /// Several inputs map to the same output file and overwrite each other.
    OutputCollision {
        output: PathBuf,
        sources: Vec<PathBuf>,
    },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnsupportedOutputFormat {
                requested,
                fallback,
            } => write!(f, "unsupported output format `{requested}', using {fallback}"),
            Warning::OutputCollision { output, sources } => {
                let names: Vec<_> = sources
                    .iter()
                    .map(|source| source.file_name().unwrap_or(source.as_os_str()).to_string_lossy())
                    .collect();
                write!(
                    f,
                    "{} all convert to '{}', only one of them will be kept",
                    names.join(", "),
                    output.display()
                )
            }
        }
    }
}

/// Everything a single run of the converter needs. Built once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    source_dir: PathBuf,
    destination_dir: PathBuf,
    dimensions: Dimensions,
    output_format: OutputFormat,
    filter: Filter,
    quality: Option<u8>,
    missing_input: MissingInputPolicy,
    parallel: bool,
    warnings: Vec<Warning>,
}

impl ConversionRequest {
    pub fn builder(
        source_dir: impl Into<PathBuf>,
        destination_dir: impl Into<PathBuf>,
    ) -> RequestBuilder {
        RequestBuilder::new(source_dir, destination_dir)
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn quality(&self) -> Option<u8> {
        self.quality
    }

    pub fn missing_input(&self) -> MissingInputPolicy {
        self.missing_input
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Warnings recorded while the request was built, e.g. a format fallback.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Where a file with the given stem ends up.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or(source.as_os_str());
        let mut name = stem.to_owned();
        name.push(".");
        name.push(self.output_format.extension());
        self.destination_dir.join(name)
    }
}

/// Collects raw, unvalidated settings and turns them into a [`ConversionRequest`].
///
/// Validation happens only in [`RequestBuilder::build`], so nothing touches the
/// filesystem until the whole request is known to be usable.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    source_dir: PathBuf,
    destination_dir: PathBuf,
    width: RawNumber,
    height: RawNumber,
    format: Option<String>,
    format_policy: FormatPolicy,
    filter: Filter,
    quality: Option<u8>,
    missing_input: MissingInputPolicy,
    parallel: bool,
}

#[derive(Debug, Clone)]
enum RawNumber {
    Number(i64),
    Text(String),
}

impl RequestBuilder {
    pub fn new(source_dir: impl Into<PathBuf>, destination_dir: impl Into<PathBuf>) -> Self {
        let defaults = Dimensions::default();
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            width: RawNumber::Number(defaults.width().into()),
            height: RawNumber::Number(defaults.height().into()),
            format: None,
            format_policy: FormatPolicy::default(),
            filter: Filter::default(),
            quality: None,
            missing_input: MissingInputPolicy::default(),
            parallel: false,
        }
    }

    pub fn dimensions(mut self, width: i64, height: i64) -> Self {
        self.width = RawNumber::Number(width);
        self.height = RawNumber::Number(height);
        self
    }

    /// Dimensions as typed by the user; non-numeric text is rejected by [`Self::build`].
    pub fn dimensions_text(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = RawNumber::Text(width.into());
        self.height = RawNumber::Text(height.into());
        self
    }

    /// Format name as typed by the user, matched case-insensitively.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn format_policy(mut self, policy: FormatPolicy) -> Self {
        self.format_policy = policy;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Encoder quality from 1 to 100, values outside are clamped.
    pub fn quality(mut self, quality: Option<u8>) -> Self {
        self.quality = quality.map(|q| q.clamp(1, 100));
        self
    }

    pub fn missing_input(mut self, policy: MissingInputPolicy) -> Self {
        self.missing_input = policy;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<ConversionRequest, BatchError> {
        let dimensions = match (&self.width, &self.height) {
            (RawNumber::Number(w), RawNumber::Number(h)) => Dimensions::new(*w, *h)?,
            (w, h) => Dimensions::parse(&w.to_string(), &h.to_string())?,
        };

        let mut warnings = Vec::new();
        let output_format = match &self.format {
            None => OutputFormat::default(),
            Some(requested) => match resolve_output_format(requested, self.format_policy)? {
                ResolvedFormat::Exact(format) => format,
                ResolvedFormat::Fallback(format) => {
                    log::warn!("unsupported output format `{requested}', using {format}");
                    warnings.push(Warning::UnsupportedOutputFormat {
                        requested: requested.clone(),
                        fallback: format,
                    });
                    format
                }
            },
        };

        Ok(ConversionRequest {
            source_dir: self.source_dir,
            destination_dir: self.destination_dir,
            dimensions,
            output_format,
            filter: self.filter,
            quality: self.quality,
            missing_input: self.missing_input,
            parallel: self.parallel,
            warnings,
        })
    }
}

impl Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawNumber::Number(n) => write!(f, "{n}"),
            RawNumber::Text(s) => f.write_str(s),
        }
    }
}
