// Fun fact: the geometry documentation at https://www.imagemagick.org/Magick++/Geometry.html is a lie.
//
// It says things like
// > Offsets must be given as pairs; in other words, in order to specify either xoffset or yoffset both must be present.
// but this works:
// `convert rose: -crop 50x+0 crop_half.gif`
//
// It also says the flag characters go at the end, but imagemagick strips them from
// anywhere in the string before parsing the numbers, so `100%x50%+0+0` is the same as `100x50%+0+0`.
//
// So we just rely on observing the actual behavior of `convert` instead.

use std::fmt::Display;
use std::str::{self, FromStr};

use crate::arg_parse_err::ArgParseErr;

#[cfg(test)]
use crate::utils::arbitrary;
#[cfg(test)]
use quickcheck::Arbitrary;

/// The numeric part of a geometry string: `WxH+X+Y`, every part optional.
///
/// Unlike width and height, a zero offset is still recorded as present:
/// `-crop 50x50+0+0` crops once while `-crop 50x50` slices the image into tiles.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Geometry {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub xoffset: Option<f64>,
    pub yoffset: Option<f64>,
}

#[cfg(test)]
impl Arbitrary for Geometry {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let xoffset = arbitrary::optional_finite_float(g);
        // a y offset cannot be written down without an x offset preceding it
        let yoffset = xoffset.and_then(|_| arbitrary::optional_finite_float(g));
        Self {
            width: arbitrary::optional_positive_float(g),
            height: arbitrary::optional_positive_float(g),
            xoffset,
            yoffset,
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(w) = self.width {
            write!(f, "{w}")?;
        }
        if let Some(h) = self.height {
            write!(f, "x{h}")?;
        }
        match (self.xoffset, self.yoffset) {
            (Some(x), Some(y)) => write!(f, "{x:+}{y:+}"),
            (Some(x), None) => write!(f, "{x:+}"),
            (None, Some(y)) => write!(f, "+0{y:+}"),
            (None, None) => Ok(()),
        }
    }
}

impl FromStr for Geometry {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(ArgParseErr::new());
        }

        let mut ascii = s.as_bytes();
        let mut result = Geometry::default();

        if let Some(next_char) = ascii.first() {
            if ![b'x', b'X', b'+', b'-'].contains(next_char) {
                result.width = Some(read_positive_float(&mut ascii).ok_or_else(ArgParseErr::new)?);
            }
        }
        if let Some(next_char) = ascii.first() {
            if [b'x', b'X'].contains(next_char) {
                ascii = &ascii[1..]; // skip the 'x'
                // "50x" is accepted and means the same as "50"
                if ascii.first().is_some_and(u8::is_ascii_digit) || ascii.first() == Some(&b'.') {
                    result.height =
                        Some(read_positive_float(&mut ascii).ok_or_else(ArgParseErr::new)?);
                }
            }
        }
        if let Some(next_char) = ascii.first() {
            if [b'+', b'-'].contains(next_char) {
                result.xoffset = Some(read_signed_float(&mut ascii).ok_or_else(ArgParseErr::new)?);
            }
        }
        if let Some(next_char) = ascii.first() {
            if [b'+', b'-'].contains(next_char) {
                result.yoffset = Some(read_signed_float(&mut ascii).ok_or_else(ArgParseErr::new)?);
            }
        }

        if !ascii.is_empty() {
            return Err(ArgParseErr::new());
        }
        Ok(result)
    }
}

/// Modifier characters of an extended geometry string.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct GeometryFlags {
    /// `%`
    pub percent: bool,
    /// `!`
    pub exclamation: bool,
    /// `<`
    pub less_than: bool,
    /// `>`
    pub greater_than: bool,
    /// `^`
    pub caret: bool,
    /// `@`
    pub at: bool,
}

/// Intermediate result of extended geometry parsing
///
/// Imagemagick uses the same parser for all [extended geometry](https://www.imagemagick.org/Magick++/Geometry.html).
/// Parsing is implemented on this struct, and we convert it into more specific structs like
/// [CropGeometry](super::CropGeometry) later.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct ExtGeometry {
    pub geom: Geometry,
    pub flags: GeometryFlags,
}

impl FromStr for ExtGeometry {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(ArgParseErr::new());
        }

        let mut flags = GeometryFlags::default();
        let mut numbers = String::with_capacity(s.len());
        for c in s.chars() {
            let flag = match c {
                '%' => &mut flags.percent,
                '!' => &mut flags.exclamation,
                '<' => &mut flags.less_than,
                '>' => &mut flags.greater_than,
                '^' => &mut flags.caret,
                '@' => &mut flags.at,
                c if c.is_ascii_whitespace() => continue,
                c => {
                    numbers.push(c);
                    continue;
                }
            };
            *flag = true;
        }

        let geom = Geometry::from_str(&numbers)?;
        Ok(Self { geom, flags })
    }
}

fn read_positive_float(input: &mut &[u8]) -> Option<f64> {
    read_float(input, false)
}

fn read_signed_float(input: &mut &[u8]) -> Option<f64> {
    read_float(input, true)
}

fn read_float(input: &mut &[u8], allow_sign: bool) -> Option<f64> {
    let mut count = 0;
    if [Some(&b'+'), Some(&b'-')].contains(&input.first()) {
        match allow_sign {
            true => count += 1,
            false => return None,
        }
    }
    count += count_leading_digits(&input[count..]);
    if input.get(count) == Some(&b'.') {
        // imagemagick permits having a trailing dot with no digits following it
        count += 1;
        count += count_leading_digits(&input[count..]);
    }

    let (number, remainder) = input.split_at(count);
    let float = str::from_utf8(number).ok()?.parse::<f64>().ok()?;
    *input = remainder;
    Some(float)
}

fn count_leading_digits(input: &[u8]) -> usize {
    input
        .iter()
        .copied()
        .take_while(|b| b.is_ascii_digit())
        .count()
}
