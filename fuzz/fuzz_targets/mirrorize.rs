#![no_main]

use std::{num::NonZeroU8, path::Path};

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use mirrorize::{mirrorize::template, Direction, Directive};

#[derive(Debug)]
struct StructuredImage {
    width: NonZeroU8,
    height: NonZeroU8,
    rgb_data: Vec<u8>,
}

impl StructuredImage {
    fn save_as_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let (width, height) = (u32::from(self.width.get()), u32::from(self.height.get()));
        let img = image::RgbImage::from_raw(width, height, self.rgb_data.clone())
            .expect("buffer length matches the dimensions");
        img.save_with_format(path, image::ImageFormat::Png)
    }
}

impl<'a> arbitrary::Arbitrary<'a> for StructuredImage {
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let width: NonZeroU8 = unstructured.arbitrary()?;
        let height: NonZeroU8 = unstructured.arbitrary()?;
        let rgb_data_len = width.get() as usize * height.get() as usize * 3;
        let rgb_data = unstructured.bytes(rgb_data_len)?;

        Ok(Self {
            width,
            height,
            rgb_data: rgb_data.to_vec(),
        })
    }
}

#[derive(Debug, arbitrary::Arbitrary)]
enum FuzzDirection {
    North,
    South,
    East,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl From<FuzzDirection> for Direction {
    fn from(value: FuzzDirection) -> Self {
        match value {
            FuzzDirection::North => Direction::North,
            FuzzDirection::South => Direction::South,
            FuzzDirection::East => Direction::East,
            FuzzDirection::West => Direction::West,
            FuzzDirection::NorthWest => Direction::NorthWest,
            FuzzDirection::NorthEast => Direction::NorthEast,
            FuzzDirection::SouthWest => Direction::SouthWest,
            FuzzDirection::SouthEast => Direction::SouthEast,
        }
    }
}

fuzz_target!(|input: (StructuredImage, FuzzDirection)| {
    let (image, direction) = input;
    let direction = Direction::from(direction);

    let temp_directory = tempfile::tempdir().expect("failed to create temporary directory");
    let input_path = temp_directory.path().join("input_image.png");
    image
        .save_as_png(&input_path)
        .expect("failed to save image as PNG");
    let input_path = input_path.to_str().expect("must be valid").to_owned();

    // our binary gets the operator, imagemagick gets the directives it expands to
    let wm_arguments = vec![input_path.clone(), "-mirrorize".to_owned(), direction.to_string()];
    let mut magick_arguments = vec![input_path];
    magick_arguments.extend(template(direction).iter().flat_map(Directive::to_args));

    wondermagick_mirrorize_fuzz::run_commands_and_compare(
        &temp_directory,
        &wm_arguments,
        &magick_arguments,
    );
});
