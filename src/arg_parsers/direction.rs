use std::str::FromStr;

use crate::arg_parse_err::ArgParseErr;

/// The side or corner of the image that `-mirrorize` keeps and reflects.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::VariantArray,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    North,
    South,
    East,
    #[default]
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// Resolves an optional direction, ignoring case.
    ///
    /// A missing or empty direction means [`Direction::West`]. Anything else that
    /// is not one of the eight names, padded names included, resolves to `None`.
    pub fn resolve(direction: Option<&str>) -> Option<Self> {
        match direction {
            None | Some("") => Some(Self::default()),
            Some(name) => Self::from_str(name).ok(),
        }
    }

    /// Strict parsing for the command line, with an imagemagick-style error message.
    pub fn parse(s: &str) -> Result<Self, ArgParseErr> {
        Self::from_str(s.trim())
            .map_err(|_| ArgParseErr::with_msg(format!("unrecognized direction `{s}'")))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use strum::VariantArray;
        *g.choose(Self::VARIANTS).unwrap()
    }
}
