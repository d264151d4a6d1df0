use image::{DynamicImage, ImageBuffer};
use pic_scale_safe::ImageSize;

use crate::{dimensions::Dimensions, error::FileError, filter::Filter};

/// Stretches the image to exactly `dimensions`, ignoring the aspect ratio.
///
/// The result is always 8-bit RGB, or RGBA if the source had an alpha channel.
pub fn resize_exact(
    image: DynamicImage,
    dimensions: Dimensions,
    filter: Filter,
) -> Result<DynamicImage, FileError> {
    let (dst_width, dst_height) = (dimensions.width(), dimensions.height());
    let src_size = ImageSize::new(image.width() as usize, image.height() as usize);
    let dst_size = ImageSize::new(dst_width as usize, dst_height as usize);
    let resampling = filter.into_resampling();
    let has_alpha = image.color().has_alpha();
    check_allocation(dimensions, if has_alpha { 4 } else { 3 })?;

    if has_alpha {
        let src = image.into_rgba8();
        if src.dimensions() == (dst_width, dst_height) {
            return Ok(DynamicImage::ImageRgba8(src));
        }
        // resample premultiplied so fully transparent pixels don't bleed their colour
        let blends = filter != Filter::Point;
        let mut src_pixels = src.into_raw();
        if blends {
            pic_scale_safe::premultiply_rgba8(&mut src_pixels);
        }
        let mut pixels = pic_scale_safe::resize_rgba8(&src_pixels, src_size, dst_size, resampling)
            .map_err(|e| FileError::Resize(e.to_string()))?;
        if blends {
            pic_scale_safe::unpremultiply_rgba8(&mut pixels);
        }
        let buffer = ImageBuffer::from_raw(dst_width, dst_height, pixels)
            .ok_or_else(|| FileError::Resize("resampled buffer has the wrong size".into()))?;
        Ok(DynamicImage::ImageRgba8(buffer))
    } else {
        let src = image.into_rgb8();
        if src.dimensions() == (dst_width, dst_height) {
            return Ok(DynamicImage::ImageRgb8(src));
        }
        let pixels = pic_scale_safe::resize_rgb8(src.as_raw(), src_size, dst_size, resampling)
            .map_err(|e| FileError::Resize(e.to_string()))?;
        let buffer = ImageBuffer::from_raw(dst_width, dst_height, pixels)
            .ok_or_else(|| FileError::Resize("resampled buffer has the wrong size".into()))?;
        Ok(DynamicImage::ImageRgb8(buffer))
    }
}

/// Refuses targets larger than the default `image` allocation limit instead of aborting on OOM.
fn check_allocation(dimensions: Dimensions, channels: u64) -> Result<(), FileError> {
    let Some(max_alloc) = image::Limits::default().max_alloc else {
        return Ok(());
    };
    let needed = u64::from(dimensions.width())
        .saturating_mul(u64::from(dimensions.height()))
        .saturating_mul(channels);
    if needed > max_alloc {
        return Err(FileError::Resize(format!(
            "target size {dimensions} needs {needed} bytes, more than the {max_alloc} byte limit"
        )));
    }
    Ok(())
}
