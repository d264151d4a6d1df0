use std::fmt::Display;

use pic_scale_safe::ResamplingFunction;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, strum::EnumString, strum::IntoStaticStr, strum::VariantArray)]
#[strum(ascii_case_insensitive)]
/// Resampling filter used when stretching images to the target size
pub enum Filter {
    Point,
    Box,
    Triangle,
    /// Bicubic with a = -0.5, the usual "bicubic" of photo editors
    #[default]
    Catrom,
    Mitchell,
    Lanczos,
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stringified: &'static str = self.into();
        f.write_str(stringified)
    }
}

impl Filter {
    pub fn into_resampling(self) -> ResamplingFunction {
        match self {
            Filter::Point => ResamplingFunction::Nearest,
            Filter::Box => ResamplingFunction::Box,
            Filter::Triangle => ResamplingFunction::Bilinear,
            Filter::Catrom => ResamplingFunction::CatmullRom,
            Filter::Mitchell => ResamplingFunction::MitchellNetravalli,
            Filter::Lanczos => ResamplingFunction::Lanczos3,
        }
    }
}
