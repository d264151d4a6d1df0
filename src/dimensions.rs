use std::{fmt::Display, num::NonZeroU32, str::FromStr};

use crate::error::BatchError;

/// Exact pixel size every image in the batch is stretched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

const DEFAULT_WIDTH: NonZeroU32 = match NonZeroU32::new(800) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_HEIGHT: NonZeroU32 = match NonZeroU32::new(600) {
    Some(n) => n,
    None => unreachable!(),
};

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Dimensions {
    /// Accepts any integers and rejects the ones that are not usable as a pixel size.
    pub fn new(width: i64, height: i64) -> Result<Self, BatchError> {
        let invalid = || BatchError::InvalidDimensions {
            width: width.to_string(),
            height: height.to_string(),
        };
        let width_px = u32::try_from(width).ok().and_then(NonZeroU32::new);
        let height_px = u32::try_from(height).ok().and_then(NonZeroU32::new);
        match (width_px, height_px) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(invalid()),
        }
    }

    /// Parses raw user input such as the answers to the interactive prompts.
    pub fn parse(width: &str, height: &str) -> Result<Self, BatchError> {
        let invalid = || BatchError::InvalidDimensions {
            width: width.to_owned(),
            height: height.to_owned(),
        };
        let width_num = strip_and_parse_number::<i64>(width).map_err(|_| invalid())?;
        let height_num = strip_and_parse_number::<i64>(height).map_err(|_| invalid())?;
        Self::new(width_num, height_num).map_err(|_| invalid())
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Strips leading and trailing whitespace and parses the rest as `T`.
fn strip_and_parse_number<T>(input: &str) -> Result<T, T::Err>
where
    T: FromStr,
    T::Err: std::error::Error,
{
    input.trim().parse::<T>()
}
