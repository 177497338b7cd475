use image::{imageops::replace, ColorType, DynamicImage};

use crate::{
    arg_parsers::Gravity,
    error::MagickError,
    image::{Image, Page},
    operations::Axis,
    wm_err,
};

/// Joins all images of the list into one, left to right for `Axis::Horizontal` (`+append`)
/// or top to bottom for `Axis::Vertical` (`-append`).
///
/// Images narrower than the result are aligned according to gravity,
/// the uncovered area is left at zero.
pub fn append(images: &mut Vec<Image>, axis: Axis, gravity: Gravity) -> Result<(), MagickError> {
    let Some(first) = images.first() else {
        return Err(wm_err!("no images to append"));
    };
    let format = first.format;

    let (width, height) = match axis {
        Axis::Horizontal => (
            images.iter().map(Image::width).sum::<u32>(),
            images.iter().map(Image::height).max().unwrap_or(0),
        ),
        Axis::Vertical => (
            images.iter().map(Image::width).max().unwrap_or(0),
            images.iter().map(Image::height).sum::<u32>(),
        ),
    };

    let mut canvas = DynamicImage::new(width, height, common_color(images));
    let mut cursor = 0i64;
    for image in images.iter() {
        let (w, h) = image.dimensions();
        let (x, y) = match axis {
            Axis::Horizontal => (cursor, gravity.place((w, height), (w, h), (0, 0)).1),
            Axis::Vertical => (gravity.place((width, h), (w, h), (0, 0)).0, cursor),
        };
        paste(&mut canvas, &image.pixels, x, y);
        cursor += match axis {
            Axis::Horizontal => i64::from(w),
            Axis::Vertical => i64::from(h),
        };
    }

    *images = vec![Image {
        format,
        page: Page::default(),
        pixels: canvas,
    }];
    Ok(())
}

/// The color type all images can be converted to without loss.
fn common_color(images: &[Image]) -> ColorType {
    let first = images[0].pixels.color();
    if images.iter().all(|image| image.pixels.color() == first) {
        return first;
    }
    let widest_channel = images
        .iter()
        .map(|image| {
            let color = image.pixels.color();
            color.bytes_per_pixel() / color.channel_count()
        })
        .max()
        .unwrap_or(1);
    match widest_channel {
        1 => ColorType::Rgba8,
        2 => ColorType::Rgba16,
        _ => ColorType::Rgba32F,
    }
}

fn paste(canvas: &mut DynamicImage, tile: &DynamicImage, x: i64, y: i64) {
    match canvas {
        DynamicImage::ImageLuma8(buffer) => replace(buffer, &tile.to_luma8(), x, y),
        DynamicImage::ImageLumaA8(buffer) => replace(buffer, &tile.to_luma_alpha8(), x, y),
        DynamicImage::ImageRgb8(buffer) => replace(buffer, &tile.to_rgb8(), x, y),
        DynamicImage::ImageRgba8(buffer) => replace(buffer, &tile.to_rgba8(), x, y),
        DynamicImage::ImageLuma16(buffer) => replace(buffer, &tile.to_luma16(), x, y),
        DynamicImage::ImageLumaA16(buffer) => replace(buffer, &tile.to_luma_alpha16(), x, y),
        DynamicImage::ImageRgb16(buffer) => replace(buffer, &tile.to_rgb16(), x, y),
        DynamicImage::ImageRgba16(buffer) => replace(buffer, &tile.to_rgba16(), x, y),
        DynamicImage::ImageRgb32F(buffer) => replace(buffer, &tile.to_rgb32f(), x, y),
        DynamicImage::ImageRgba32F(buffer) => replace(buffer, &tile.to_rgba32f(), x, y),
        other => replace(other, tile, x, y),
    }
}
