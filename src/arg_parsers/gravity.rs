use std::str::FromStr;

use crate::arg_parse_err::ArgParseErr;

#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum Gravity {
    #[default]
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Gravity {
    /// Parses the value of `-gravity`, with the imagemagick error message on failure.
    pub fn parse(s: &str) -> Result<Self, ArgParseErr> {
        Self::from_str(s)
            .map_err(|_| ArgParseErr::with_msg(format!("unrecognized gravity `{s}'")))
    }

    /// Positions a `region` of the given size inside an `outer` area.
    ///
    /// The offset moves the region away from the edge the gravity points at,
    /// so `+10+0` with `East` gravity ends up 10 pixels left of the right edge.
    /// Returns the top-left corner of the region relative to the outer area.
    pub fn place(self, outer: (u32, u32), region: (u32, u32), offset: (i64, i64)) -> (i64, i64) {
        let (outer_w, outer_h) = (i64::from(outer.0), i64::from(outer.1));
        let (region_w, region_h) = (i64::from(region.0), i64::from(region.1));
        let (dx, dy) = offset;

        let x = match self {
            Gravity::NorthWest | Gravity::West | Gravity::SouthWest => dx,
            Gravity::North | Gravity::Center | Gravity::South => (outer_w - region_w) / 2 + dx,
            Gravity::NorthEast | Gravity::East | Gravity::SouthEast => outer_w - region_w - dx,
        };
        let y = match self {
            Gravity::NorthWest | Gravity::North | Gravity::NorthEast => dy,
            Gravity::West | Gravity::Center | Gravity::East => (outer_h - region_h) / 2 + dy,
            Gravity::SouthWest | Gravity::South | Gravity::SouthEast => outer_h - region_h - dy,
        };
        (x, y)
    }
}
