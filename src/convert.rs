//! The batch loop: checks the preconditions, then converts every discovered
//! image in isolation so that one bad file never stops the others.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use rayon::prelude::*;

use crate::{
    decode::decode,
    encode::encode,
    error::{BatchError, FileError},
    report::{ConversionResult, Outcome, Report},
    request::{ConversionRequest, MissingInputPolicy, Warning},
    resize::resize_exact,
    scan::{discover, ImageFile},
};

/// Observes results as they are produced, e.g. to print status lines.
///
/// In parallel runs this is called from worker threads, in completion order.
pub trait Reporter: Sync {
    fn on_result(&self, result: &ConversionResult);
}

impl Reporter for () {
    fn on_result(&self, _result: &ConversionResult) {}
}

/// Cooperative cancellation, checked before each file is started.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub fn convert(request: &ConversionRequest) -> Result<Report, BatchError> {
    convert_with(request, &(), &CancelToken::new())
}

pub fn convert_with(
    request: &ConversionRequest,
    reporter: &dyn Reporter,
    cancel: &CancelToken,
) -> Result<Report, BatchError> {
    check_input_dir(request)?;

    let destination = request.destination_dir();
    std::fs::create_dir_all(destination).map_err(|source| BatchError::CreateDirectory {
        path: destination.to_owned(),
        source,
    })?;

    let files = discover(request.source_dir())?;
    log::info!(
        "converting {} images from '{}' to {} {} in '{}'",
        files.len(),
        request.source_dir().display(),
        request.dimensions(),
        request.output_format(),
        destination.display()
    );

    let mut warnings = request.warnings().to_vec();
    for warning in find_collisions(request, &files) {
        log::warn!("{warning}");
        warnings.push(warning);
    }

    let process = |file: &ImageFile| -> Option<ConversionResult> {
        if cancel.is_cancelled() {
            return None;
        }
        let result = convert_one(request, file);
        match &result.outcome {
            Outcome::Success { output } => log::debug!("wrote '{}'", output.display()),
            Outcome::Failure { reason } => {
                log::warn!("failed to convert '{}': {reason}", result.source.display())
            }
        }
        reporter.on_result(&result);
        Some(result)
    };

    // one slot per file keeps the report in discovery order either way
    let slots: Vec<Option<ConversionResult>> = if request.parallel() {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    let cancelled = slots.iter().any(Option::is_none);
    let results: Vec<_> = slots.into_iter().flatten().collect();
    let report = Report {
        results,
        warnings,
        cancelled,
    };
    log::info!("{}", report.summary());
    Ok(report)
}

fn check_input_dir(request: &ConversionRequest) -> Result<(), BatchError> {
    let source = request.source_dir();
    if source.is_dir() {
        return Ok(());
    }
    let path = source.to_owned();
    // a file in the way is neither missing nor something we can create
    if source.exists() {
        return Err(BatchError::InputNotADirectory { path });
    }
    match request.missing_input() {
        MissingInputPolicy::Fail => Err(BatchError::MissingInputDirectory { path }),
        MissingInputPolicy::CreateAndAbort => {
            std::fs::create_dir_all(&path).map_err(|source| BatchError::CreateDirectory {
                path: path.clone(),
                source,
            })?;
            Err(BatchError::InputDirectoryCreated { path })
        }
    }
}

/// Inputs sharing a stem, like `a.png` and `a.jpg`, would overwrite each other's output.
fn find_collisions(request: &ConversionRequest, files: &[ImageFile]) -> Vec<Warning> {
    let mut by_output: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        by_output
            .entry(request.output_path_for(&file.path))
            .or_default()
            .push(file.path.clone());
    }
    by_output
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(output, sources)| Warning::OutputCollision { output, sources })
        .collect()
}

fn convert_one(request: &ConversionRequest, file: &ImageFile) -> ConversionResult {
    let output = request.output_path_for(&file.path);
    let outcome = match convert_file(request, file, &output) {
        Ok(()) => Outcome::Success { output },
        Err(e) => Outcome::Failure {
            reason: e.to_string(),
        },
    };
    ConversionResult {
        source: file.path.clone(),
        outcome,
    }
}

fn convert_file(
    request: &ConversionRequest,
    file: &ImageFile,
    output: &Path,
) -> Result<(), FileError> {
    let image = decode(file)?;
    log::debug!(
        "decoded '{}' ({}x{})",
        file.path.display(),
        image.width(),
        image.height()
    );
    let resized = resize_exact(image, request.dimensions(), request.filter())?;
    encode(&resized, output, request.output_format(), request.quality())
}
