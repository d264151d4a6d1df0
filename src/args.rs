//! Command-line and interactive settings for `wm-batch`.

use std::path::PathBuf;

use clap::Parser;
use dialoguer::Input;
use strum::VariantArray;

use crate::{
    filter::Filter,
    format::FormatPolicy,
    help::version_string,
    request::{ConversionRequest, MissingInputPolicy, RequestBuilder},
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wm-batch",
    version,
    long_version = version_string(),
    about = "Resize every image in a directory and convert it to another format",
    long_about = "Resizes every PNG, JPEG, BMP and GIF file directly inside the input directory \
                  to exactly the given width and height, and writes it to the output directory \
                  as PNG, JPEG or BMP. Files that fail to convert are reported and skipped."
)]
pub struct Cli {
    /// Directory to read images from
    #[arg(short, long, default_value = "images")]
    pub input: PathBuf,
    /// Directory to write converted images to, created if missing
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
    /// Target width in pixels
    #[arg(long, default_value = "800", allow_hyphen_values = true)]
    pub width: String,
    /// Target height in pixels
    #[arg(long, default_value = "600", allow_hyphen_values = true)]
    pub height: String,
    /// Output format: PNG, JPEG or BMP. Anything else falls back to PNG
    #[arg(short, long, default_value = "PNG")]
    pub format: String,
    /// Refuse to run on an unsupported output format instead of falling back to PNG
    #[arg(long)]
    pub strict_format: bool,
    /// Create the input directory if it does not exist, then stop
    #[arg(long)]
    pub create_missing_input: bool,
    /// Resampling filter
    #[arg(long, default_value = "catrom", value_parser = parse_filter)]
    pub filter: Filter,
    /// Encoder quality from 1 to 100
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
    /// Convert several images at once
    #[arg(long)]
    pub parallel: bool,
    /// Ask for the width, height and format instead of taking them from the flags
    #[arg(short = 'I', long)]
    pub interactive: bool,
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

fn parse_filter(s: &str) -> Result<Filter, String> {
    Filter::try_from(s).map_err(|_| {
        let known: Vec<String> = Filter::VARIANTS.iter().map(|f| f.to_string()).collect();
        format!("unrecognized filter `{s}', expected one of: {}", known.join(", "))
    })
}

impl Cli {
    pub fn builder(&self) -> RequestBuilder {
        self.builder_with(&self.width, &self.height, &self.format)
    }

    fn builder_with(&self, width: &str, height: &str, format: &str) -> RequestBuilder {
        let format_policy = if self.strict_format {
            FormatPolicy::Strict
        } else {
            FormatPolicy::Lenient
        };
        let missing_input = if self.create_missing_input {
            MissingInputPolicy::CreateAndAbort
        } else {
            MissingInputPolicy::Fail
        };
        ConversionRequest::builder(&self.input, &self.output)
            .dimensions_text(width, height)
            .format(format)
            .format_policy(format_policy)
            .filter(self.filter)
            .quality(self.quality)
            .missing_input(missing_input)
            .parallel(self.parallel)
    }

    /// Asks for the dimensions and format, offering the flag values as defaults.
    pub fn prompt(&self) -> Result<RequestBuilder, dialoguer::Error> {
        let width: String = Input::new()
            .with_prompt("Enter new width")
            .default(self.width.clone())
            .interact_text()?;
        let height: String = Input::new()
            .with_prompt("Enter new height")
            .default(self.height.clone())
            .interact_text()?;
        let format: String = Input::new()
            .with_prompt("Enter output format (PNG/JPEG/BMP)")
            .default(self.format.clone())
            .interact_text()?;
        Ok(self.builder_with(&width, &height, &format))
    }
}

/// Sets up `env_logger` at `level`. `RUST_LOG`, if set, takes precedence.
///
/// Call once, at startup.
pub fn init_logging(level: &str) {
    let level_filter = match level {
        "error" => log::LevelFilter::Error,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level_filter)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    use crate::{error::BatchError, format::OutputFormat};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["wm-batch"]).unwrap();
        let request = cli.builder().build().unwrap();
        assert_eq!(request.source_dir(), std::path::Path::new("images"));
        assert_eq!(request.destination_dir(), std::path::Path::new("output"));
        assert_eq!(request.dimensions().to_string(), "800x600");
        assert_eq!(request.output_format(), OutputFormat::Png);
        assert_eq!(request.missing_input(), MissingInputPolicy::Fail);
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "wm-batch",
            "-i",
            "in",
            "-o",
            "out",
            "--width",
            "64",
            "--height",
            "32",
            "-f",
            "jpeg",
            "--filter",
            "LANCZOS",
            "-q",
            "80",
            "--parallel",
            "--create-missing-input",
        ])
        .unwrap();
        let request = cli.builder().build().unwrap();
        assert_eq!(request.dimensions().to_string(), "64x32");
        assert_eq!(request.output_format(), OutputFormat::Jpeg);
        assert_eq!(request.filter(), Filter::Lanczos);
        assert_eq!(request.quality(), Some(80));
        assert!(request.parallel());
        assert_eq!(request.missing_input(), MissingInputPolicy::CreateAndAbort);
    }

    #[test]
    fn negative_width_reaches_validation() {
        let cli = Cli::try_parse_from(["wm-batch", "--width", "-5"]).unwrap();
        let err = cli.builder().build().unwrap_err();
        assert!(matches!(err, BatchError::InvalidDimensions { .. }));
    }

    #[test]
    fn strict_format_flag() {
        let cli = Cli::try_parse_from(["wm-batch", "-f", "tiff", "--strict-format"]).unwrap();
        assert!(matches!(
            cli.builder().build(),
            Err(BatchError::UnsupportedOutputFormat { .. })
        ));
    }

    #[test]
    fn prompted_answers_override_flags() {
        let cli = Cli::try_parse_from(["wm-batch", "-i", "in", "-q", "70", "--parallel"]).unwrap();

        let request = cli.builder_with(" 640 ", "480\n", "jpeg").build().unwrap();
        assert_eq!(request.dimensions().to_string(), "640x480");
        assert_eq!(request.output_format(), OutputFormat::Jpeg);
        assert_eq!(request.source_dir(), std::path::Path::new("in"));
        assert_eq!(request.quality(), Some(70));
        assert!(request.parallel());

        let request = cli.builder_with("320", "200", "gif").build().unwrap();
        assert_eq!(request.output_format(), OutputFormat::Png);
        assert_eq!(request.warnings().len(), 1);

        let err = cli.builder_with("abc", "200", "png").build().unwrap_err();
        assert!(matches!(err, BatchError::InvalidDimensions { .. }));
    }

    #[test]
    fn rejects_unknown_filter_and_bad_quality() {
        assert!(Cli::try_parse_from(["wm-batch", "--filter", "sinc"]).is_err());
        assert!(Cli::try_parse_from(["wm-batch", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["wm-batch", "-q", "101"]).is_err());
    }
}
