use image::DynamicImage;

use crate::{
    arg_parsers::{CropGeometry, Gravity},
    image::{Image, Page},
};

/// Applies `-crop` to every image in the list.
///
/// Percentages are relative to each image's own size and gravity positions the region
/// inside the image, but the result is taken from the virtual canvas. An image that
/// still carries the page offset of an earlier crop needs `+repage` first, as in imagemagick.
pub fn crop(images: &mut Vec<Image>, geom: &CropGeometry, gravity: Gravity) {
    let mut cropped = Vec::with_capacity(images.len());
    for image in images.drain(..) {
        if geom.slice_into_many() {
            cropped.extend(crop_to_tiles(&image, geom));
        } else {
            cropped.push(crop_once(&image, geom, gravity));
        }
    }
    *images = cropped;
}

fn crop_once(image: &Image, geom: &CropGeometry, gravity: Gravity) -> Image {
    let (columns, rows) = image.dimensions();
    let (width, height) = geom.region_size(columns, rows);
    let (x, y) = gravity.place((columns, rows), (width, height), geom.offset());
    let mut result = crop_canvas_region(image, x, y, width, height);
    if geom.repage {
        result.page = Page::default();
    }
    result
}

fn crop_to_tiles(image: &Image, geom: &CropGeometry) -> Vec<Image> {
    let (columns, rows) = image.dimensions();
    let (width, height) = geom.region_size(columns, rows);
    let mut tiles = Vec::new();
    for top in (0..rows).step_by(height.max(1) as usize) {
        for left in (0..columns).step_by(width.max(1) as usize) {
            let mut tile = crop_canvas_region(
                image,
                image.page.x + i64::from(left),
                image.page.y + i64::from(top),
                width,
                height,
            );
            if geom.repage {
                tile.page = Page::default();
            }
            tiles.push(tile);
        }
    }
    tiles
}

/// Cuts out a region given in virtual canvas coordinates, clipped to the image.
fn crop_canvas_region(image: &Image, x: i64, y: i64, width: u32, height: u32) -> Image {
    let (columns, rows) = (i64::from(image.width()), i64::from(image.height()));
    let (canvas_width, canvas_height) = image.canvas_size();

    let left = (x - image.page.x).clamp(0, columns);
    let top = (y - image.page.y).clamp(0, rows);
    let right = (x - image.page.x + i64::from(width)).clamp(0, columns);
    let bottom = (y - image.page.y + i64::from(height)).clamp(0, rows);

    if right <= left || bottom <= top {
        // imagemagick warns that the geometry does not contain the image
        // and carries on with a single transparent pixel
        return Image {
            format: image.format,
            page: Page {
                width: canvas_width,
                height: canvas_height,
                x: 0,
                y: 0,
            },
            pixels: DynamicImage::new(1, 1, image.pixels.color()),
        };
    }

    let pixels = image.pixels.crop_imm(
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    );
    Image {
        format: image.format,
        page: Page {
            width: canvas_width,
            height: canvas_height,
            x: image.page.x + left,
            y: image.page.y + top,
        },
        pixels,
    }
}
