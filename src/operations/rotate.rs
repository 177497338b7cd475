//! Image rotation operations.

use crate::{arg_parsers::RotateGeometry, error::MagickError, image::Image, wm_err};

/// Rotates clockwise by a multiple of 90 degrees, which is lossless.
///
/// Arbitrary angles would need resampling onto a larger canvas and are rejected.
pub fn rotate(image: &mut Image, geometry: &RotateGeometry) -> Result<(), MagickError> {
    let (width, height) = image.dimensions();

    // Check rotation conditions.
    if geometry.only_if_wider && width <= height {
        return Ok(()); // Skip rotation.
    }
    if geometry.only_if_taller && width >= height {
        return Ok(()); // Skip rotation.
    }

    let Some(turns) = geometry.quarter_turns() else {
        return Err(wm_err!(
            "rotation by {} degrees is not supported, only multiples of 90",
            geometry.degrees
        ));
    };

    let page = image.page;
    let (page_w, page_h) = (i64::from(page.width), i64::from(page.height));
    let (w, h) = (i64::from(width), i64::from(height));
    match turns {
        0 => {}
        1 => {
            image.pixels = image.pixels.rotate90();
            if !page.is_empty() {
                image.page.width = page.height;
                image.page.height = page.width;
                image.page.x = page_h - h - page.y;
                image.page.y = page.x;
            }
        }
        2 => {
            image.pixels = image.pixels.rotate180();
            if page.width != 0 {
                image.page.x = page_w - w - page.x;
            }
            if page.height != 0 {
                image.page.y = page_h - h - page.y;
            }
        }
        3 => {
            image.pixels = image.pixels.rotate270();
            if !page.is_empty() {
                image.page.width = page.height;
                image.page.height = page.width;
                image.page.x = page.y;
                image.page.y = page_w - w - page.x;
            }
        }
        _ => unreachable!("quarter turns are reduced modulo 4"),
    }
    Ok(())
}
