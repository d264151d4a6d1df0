use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::{filter::Filter, format::OutputFormat};

/// Shown by `wm-batch --version`.
pub fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let version = env!("CARGO_PKG_VERSION");
    let outputs: Vec<String> = OutputFormat::VARIANTS.iter().map(|f| f.to_string()).collect();
    let filters: Vec<String> = Filter::VARIANTS.iter().map(|f| f.to_string()).collect();

    format!(
        "{version} {cpu}\n\
         License: {}\n\
         Reads: PNG JPEG BMP GIF\n\
         Writes: {}\n\
         Filters: {}",
        env!("CARGO_PKG_LICENSE"),
        outputs.join(" "),
        filters.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_formats() {
        let version = version_string();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.contains("Writes: PNG JPEG BMP"));
        assert!(version.contains("Catrom"));
    }
}
