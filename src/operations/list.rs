//! Operators that rearrange the image list rather than the pixels.

use crate::{
    arg_parsers::ImageSelection, error::MagickError, image::Image, sequence::ImageSequence, wm_err,
};

/// `+clone` (no selection) copies the last image, `-clone <selection>` the selected ones.
///
/// Inside parentheses the images are taken from the enclosing list.
pub fn clone(
    sequence: &mut ImageSequence,
    selection: Option<&ImageSelection>,
) -> Result<(), MagickError> {
    let source = sequence.clone_source();
    let clones: Vec<Image> = match selection {
        None => match source.last() {
            Some(last) => vec![last.clone()],
            None => return Err(wm_err!("unable to clone image: no images defined")),
        },
        Some(selection) => {
            let indices = selection.resolve(source.len()).ok_or_else(|| {
                wm_err!(
                    "unable to clone image: invalid image index `{selection}' in a list of {}",
                    source.len()
                )
            })?;
            indices.into_iter().map(|i| source[i].clone()).collect()
        }
    };
    sequence.current_mut().extend(clones);
    Ok(())
}

/// `+swap`: exchanges the last two images.
pub fn swap(images: &mut [Image]) -> Result<(), MagickError> {
    let len = images.len();
    if len < 2 {
        return Err(wm_err!("unable to swap images: the list holds {len} image(s)"));
    }
    images.swap(len - 2, len - 1);
    Ok(())
}

/// `-delete <selection>`: removes the selected images.
pub fn delete(images: &mut Vec<Image>, selection: &ImageSelection) -> Result<(), MagickError> {
    let mut indices = selection.resolve(images.len()).ok_or_else(|| {
        wm_err!(
            "unable to delete images: invalid image index `{selection}' in a list of {}",
            images.len()
        )
    })?;
    indices.sort_unstable();
    indices.dedup();
    for index in indices.into_iter().rev() {
        images.remove(index);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

    use super::*;

    fn tagged(tag: u8) -> Image {
        Image::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            1,
            1,
            Rgb([tag, 0, 0]),
        )))
    }

    fn tags(images: &[Image]) -> Vec<u8> {
        images
            .iter()
            .map(|image| image.pixels.get_pixel(0, 0).0[0])
            .collect()
    }

    #[test]
    fn test_clone_last_from_enclosing_list() {
        let mut sequence = ImageSequence::new(vec![tagged(1), tagged(2)]);
        sequence.open_group();
        clone(&mut sequence, None).unwrap();
        assert_eq!(tags(sequence.current()), vec![2]);
        sequence.close_group().unwrap();
        assert_eq!(tags(sequence.current()), vec![1, 2, 2]);
    }

    #[test]
    fn test_clone_selection() {
        let mut sequence = ImageSequence::new(vec![tagged(1), tagged(2), tagged(3)]);
        sequence.open_group();
        clone(&mut sequence, Some(&ImageSelection::index(2))).unwrap();
        clone(&mut sequence, Some(&ImageSelection::index(0))).unwrap();
        assert_eq!(tags(sequence.current()), vec![3, 1]);
    }

    #[test]
    fn test_clone_at_top_level_uses_current_list() {
        let mut sequence = ImageSequence::new(vec![tagged(7)]);
        clone(&mut sequence, None).unwrap();
        assert_eq!(tags(sequence.current()), vec![7, 7]);
    }

    #[test]
    fn test_clone_bad_index() {
        let mut sequence = ImageSequence::new(vec![tagged(1)]);
        sequence.open_group();
        assert!(clone(&mut sequence, Some(&ImageSelection::index(1))).is_err());
        let mut empty = ImageSequence::new(Vec::new());
        assert!(clone(&mut empty, None).is_err());
    }

    #[test]
    fn test_swap() {
        let mut images = vec![tagged(1), tagged(2), tagged(3)];
        swap(&mut images).unwrap();
        assert_eq!(tags(&images), vec![1, 3, 2]);
        assert!(swap(&mut images[..1]).is_err());
    }

    #[test]
    fn test_delete_range() {
        let mut images = (1..=6).map(tagged).collect::<Vec<_>>();
        delete(&mut images, &ImageSelection::range(0, 3)).unwrap();
        assert_eq!(tags(&images), vec![5, 6]);
        assert!(delete(&mut images, &ImageSelection::index(2)).is_err());
    }
}
