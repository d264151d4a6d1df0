//! Batch image resizing and format conversion.
//!
//! Build a [`ConversionRequest`] with [`ConversionRequest::builder`], then hand it to
//! [`convert`]. Problems with individual files end up in the [`Report`]; only problems
//! that make the whole run pointless are returned as a [`BatchError`].

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod args;
pub mod convert;
mod decode;
pub mod dimensions;
mod encode;
mod encoders;
pub mod error;
pub mod filter;
pub mod format;
pub mod help;
pub mod report;
pub mod request;
mod resize;
pub mod scan;

pub use convert::{convert, convert_with, CancelToken, Reporter};
pub use error::{BatchError, FileError};
pub use report::{ConversionResult, Outcome, Report};
pub use request::{ConversionRequest, MissingInputPolicy, Warning};
