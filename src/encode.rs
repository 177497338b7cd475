use std::{
    ffi::OsStr,
    fs::File,
    io::{BufWriter, Seek, Write},
};

use image::{DynamicImage, ImageFormat};

use crate::{arg_parsers::Location, error::MagickError, image::Image, wm_err, wm_try};

pub fn encode(
    image: &Image,
    location: &Location,
    format: Option<ImageFormat>,
) -> Result<(), MagickError> {
    let format = choose_encoding_format(image, location, format)?;

    let file = match location {
        // `File::create` automatically truncates (overwrites) the file if it exists.
        Location::Path(path) => File::create(path)
            .map_err(|error| wm_err!("unable to open image `{}': {error}", path.display()))?,
        // Some of the encoders require Seek, which Stdout doesn't implement.
        // We write to a temporary file and then print out the content at the end.
        Location::Stdio => wm_try!(tempfile::tempfile()),
    };
    let mut writer = BufWriter::new(file);

    tracing::debug!(?format, ?location, "encoding");
    wm_try!(encodable(&image.pixels, format).write_to(&mut writer, format));

    match location {
        Location::Path(_) => {
            // Dropping the writer would flush too, but without reporting errors.
            wm_try!(writer.flush());
        }
        Location::Stdio => {
            let mut file = wm_try!(writer.into_inner());
            wm_try!(file.seek(std::io::SeekFrom::Start(0)));
            let mut stdout = std::io::stdout().lock();
            wm_try!(std::io::copy(&mut file, &mut stdout));
            wm_try!(stdout.flush());
        }
    }

    Ok(())
}

/// JPEG has no alpha channel; imagemagick silently drops it, so do we.
fn encodable(pixels: &DynamicImage, format: ImageFormat) -> std::borrow::Cow<'_, DynamicImage> {
    if format == ImageFormat::Jpeg && pixels.color().has_alpha() {
        std::borrow::Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8()))
    } else {
        std::borrow::Cow::Borrowed(pixels)
    }
}

fn choose_encoding_format(
    image: &Image,
    location: &Location,
    explicitly_specified: Option<ImageFormat>,
) -> Result<ImageFormat, MagickError> {
    if let Some(format) = explicitly_specified {
        return Ok(format);
    }
    // if format was not explicitly specified, guess based on the output path
    if let Location::Path(path) = location {
        if let Ok(format) = ImageFormat::from_path(path) {
            return Ok(format);
        }
    }
    // if that fails, use the input format (like ImageMagick)
    if let Some(format) = image.format {
        return Ok(format);
    }
    let extension = match location {
        // fallback to empty string matches imagemagick
        Location::Path(path) => path.extension().unwrap_or(OsStr::new("")),
        Location::Stdio => OsStr::new(""),
    };
    Err(wm_err!(
        "no encode delegate for this image format `{}'",
        extension.to_ascii_uppercase().to_string_lossy()
    ))
}
