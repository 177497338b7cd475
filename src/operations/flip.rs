use image::imageops::{flip_horizontal_in_place, flip_vertical_in_place};

use crate::{image::Image, operations::Axis};

/// Mirrors the image across the given axis.
///
/// `Axis::Vertical` turns the image upside down (`-flip`),
/// `Axis::Horizontal` mirrors it left to right (`-flop`).
/// The position on the virtual canvas is mirrored too, like imagemagick does.
pub fn mirror(image: &mut Image, axis: Axis) {
    match axis {
        Axis::Horizontal => {
            flip_horizontal_in_place(&mut image.pixels);
            if image.page.width != 0 {
                image.page.x =
                    i64::from(image.page.width) - i64::from(image.width()) - image.page.x;
            }
        }
        Axis::Vertical => {
            flip_vertical_in_place(&mut image.pixels);
            if image.page.height != 0 {
                image.page.y =
                    i64::from(image.page.height) - i64::from(image.height()) - image.page.y;
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

    use super::*;
    use crate::image::Page;

    fn two_by_two() -> Image {
        let mut buf = RgbImage::new(2, 2);
        buf.put_pixel(0, 0, Rgb([1, 0, 0]));
        buf.put_pixel(1, 0, Rgb([2, 0, 0]));
        buf.put_pixel(0, 1, Rgb([3, 0, 0]));
        buf.put_pixel(1, 1, Rgb([4, 0, 0]));
        Image::new(DynamicImage::ImageRgb8(buf))
    }

    #[test]
    fn test_flip_is_upside_down() {
        let mut image = two_by_two();
        mirror(&mut image, Axis::Vertical);
        assert_eq!(image.pixels.get_pixel(0, 0).0[0], 3);
        assert_eq!(image.pixels.get_pixel(1, 1).0[0], 2);
    }

    #[test]
    fn test_flop_is_left_to_right() {
        let mut image = two_by_two();
        mirror(&mut image, Axis::Horizontal);
        assert_eq!(image.pixels.get_pixel(0, 0).0[0], 2);
        assert_eq!(image.pixels.get_pixel(1, 1).0[0], 3);
    }

    #[test]
    fn test_page_offset_is_mirrored() {
        let mut image = two_by_two();
        image.page = Page {
            width: 10,
            height: 8,
            x: 1,
            y: 3,
        };
        mirror(&mut image, Axis::Horizontal);
        assert_eq!(image.page.x, 7);
        assert_eq!(image.page.y, 3);
        mirror(&mut image, Axis::Vertical);
        assert_eq!(image.page.y, 3);
    }
}
