use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::request::Warning;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { output: PathBuf },
    Failure { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub source: PathBuf,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
}

/// The per-file status line shown to the user.
impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = file_name(&self.source);
        match &self.outcome {
            Outcome::Success { output } => {
                write!(f, "processed: {source} -> {}", file_name(output))
            }
            Outcome::Failure { reason } => write!(f, "error processing {source}: {reason}"),
        }
    }
}

/// Everything a run produced, in the order the files were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub results: Vec<ConversionResult>,
    pub warnings: Vec<Warning>,
    /// Set when the run was cancelled before every file was started.
    pub cancelled: bool,
}

impl Report {
    pub fn successes(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// No recognised image was processed.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The final line of a run. Distinguishes "nothing to do" from an actual summary.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return if self.cancelled {
                "cancelled before any image was processed".to_owned()
            } else {
                "no supported images found, nothing to do".to_owned()
            };
        }
        let mut summary = {
            let succeeded = self.successes().count();
            let failed = self.failures().count();
            match (succeeded, failed) {
                (_, 0) => format!("all {succeeded} images processed successfully"),
                (0, _) => format!("all {failed} images failed to process"),
                _ => format!("{succeeded} images processed, {failed} failed"),
            }
        };
        if self.cancelled {
            summary.push_str(" (cancelled before all images were processed)");
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(name: &str) -> ConversionResult {
        ConversionResult {
            source: PathBuf::from("in").join(name),
            outcome: Outcome::Success {
                output: PathBuf::from("out").join(name).with_extension("png"),
            },
        }
    }

    fn failure(name: &str) -> ConversionResult {
        ConversionResult {
            source: PathBuf::from("in").join(name),
            outcome: Outcome::Failure {
                reason: "unable to decode image: bad header".into(),
            },
        }
    }

    #[test]
    fn status_lines_name_the_file() {
        assert_eq!(success("cat.jpg").to_string(), "processed: cat.jpg -> cat.png");
        assert_eq!(
            failure("dog.gif").to_string(),
            "error processing dog.gif: unable to decode image: bad header"
        );
    }

    #[test]
    fn summaries_are_distinct() {
        let empty = Report::default();
        assert_eq!(empty.summary(), "no supported images found, nothing to do");

        let ok = Report {
            results: vec![success("a.png"), success("b.png")],
            ..Default::default()
        };
        assert_eq!(ok.summary(), "all 2 images processed successfully");

        let mixed = Report {
            results: vec![success("a.png"), failure("b.png")],
            ..Default::default()
        };
        assert_eq!(mixed.summary(), "1 images processed, 1 failed");
        assert_eq!(mixed.successes().count(), 1);
        assert_eq!(mixed.failures().count(), 1);

        let bad = Report {
            results: vec![failure("b.png")],
            ..Default::default()
        };
        assert_eq!(bad.summary(), "all 1 images failed to process");

        let cancelled = Report {
            cancelled: true,
            ..Default::default()
        };
        assert_eq!(cancelled.summary(), "cancelled before any image was processed");

        let partial = Report {
            results: vec![success("a.png")],
            cancelled: true,
            ..Default::default()
        };
        assert_eq!(
            partial.summary(),
            "all 1 images processed successfully (cancelled before all images were processed)"
        );
    }
}
