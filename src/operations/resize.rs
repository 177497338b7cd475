use image::imageops::FilterType;

use crate::{arg_parsers::ResizeGeometry, image::Image};

pub fn resize(image: &mut Image, geometry: &ResizeGeometry) {
    let (src_width, src_height) = image.dimensions();
    let (dst_width, dst_height) = geometry.dimensions(src_width, src_height);
    if (src_width, src_height) == (dst_width, dst_height) {
        return;
    }
    image.pixels = image
        .pixels
        .resize_exact(dst_width, dst_height, FilterType::Lanczos3);

    // the virtual canvas is scaled along with the image
    let scale_x = f64::from(dst_width) / f64::from(src_width);
    let scale_y = f64::from(dst_height) / f64::from(src_height);
    let page = &mut image.page;
    page.width = (f64::from(page.width) * scale_x).round() as u32;
    page.height = (f64::from(page.height) * scale_y).round() as u32;
    page.x = (page.x as f64 * scale_x).round() as i64;
    page.y = (page.y as f64 * scale_y).round() as i64;
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

    use super::*;
    use crate::image::Page;

    #[test]
    fn test_exact_resize_keeps_flat_colors() {
        let buf = RgbImage::from_pixel(20, 20, Rgb([255, 0, 0]));
        let mut image = Image::new(DynamicImage::ImageRgb8(buf));
        resize(&mut image, &ResizeGeometry::exact(20, 15));
        assert_eq!(image.dimensions(), (20, 15));
        assert_eq!(image.pixels.get_pixel(10, 7).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_page_is_scaled() {
        let mut image = Image::new(DynamicImage::new_rgb8(10, 10));
        image.page = Page {
            width: 20,
            height: 20,
            x: 10,
            y: 4,
        };
        resize(&mut image, &ResizeGeometry::exact(5, 20));
        assert_eq!(
            image.page,
            Page {
                width: 10,
                height: 40,
                x: 5,
                y: 8
            }
        );
    }
}
