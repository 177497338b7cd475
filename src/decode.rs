use std::io::{Cursor, Read};

use image::{ImageFormat, ImageReader};

use crate::{arg_parsers::Location, error::MagickError, image::Image, wm_err, wm_try};

/// If the format has not been explicitly specified, guesses the format based on file contents.
pub fn decode(location: &Location, format: Option<ImageFormat>) -> Result<Image, MagickError> {
    match location {
        Location::Path(path) => {
            let reader = ImageReader::open(path).map_err(|error| {
                wm_err!("unable to open image `{}': {error}", path.display())
            })?;
            decode_from(reader, format)
        }
        Location::Stdio => {
            // stdin is not seekable, so buffer it for format detection
            let mut bytes = Vec::new();
            wm_try!(std::io::stdin().lock().read_to_end(&mut bytes));
            decode_from(ImageReader::new(Cursor::new(bytes)), format)
        }
    }
}

fn decode_from<R: std::io::BufRead + std::io::Seek>(
    mut reader: ImageReader<R>,
    format: Option<ImageFormat>,
) -> Result<Image, MagickError> {
    match format {
        Some(format) => reader.set_format(format),
        None => reader = wm_try!(reader.with_guessed_format()),
    }
    let format = reader.format();
    let pixels = wm_try!(reader.decode());
    tracing::debug!(?format, width = pixels.width(), height = pixels.height(), "decoded");
    Ok(Image {
        format,
        ..Image::new(pixels)
    })
}
