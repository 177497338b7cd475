use std::{ffi::OsStr, path::PathBuf};

use image::ImageFormat;

/// Where an image is read from or written to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    Path(PathBuf),
    /// `-` on the command line: stdin for inputs, stdout for the output.
    #[default]
    Stdio,
}

/// A filename argument, optionally with an explicit format prefix such as `png:out.dat` or `png:-`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileArg {
    pub location: Location,
    pub format: Option<ImageFormat>,
}

impl FileArg {
    pub fn parse(arg: &OsStr) -> Self {
        if let Some((format, rest)) = split_format_prefix(arg) {
            return Self {
                location: location_of(rest),
                format: Some(format),
            };
        }
        Self {
            location: location_of(arg),
            format: None,
        }
    }
}

fn location_of(arg: &OsStr) -> Location {
    if arg == "-" {
        Location::Stdio
    } else {
        Location::Path(PathBuf::from(arg))
    }
}

/// Splits off `format:` if the part before the colon names a format we know.
///
/// Single-letter prefixes are left alone so that `C:\image.png` stays a path.
fn split_format_prefix(arg: &OsStr) -> Option<(ImageFormat, &OsStr)> {
    let text = arg.to_str()?;
    let (prefix, rest) = text.split_once(':')?;
    if prefix.len() < 2 {
        return None;
    }
    let format = ImageFormat::from_extension(prefix.to_ascii_lowercase())?;
    Some((format, OsStr::new(rest)))
}
