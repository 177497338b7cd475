//! Parser for rotate argument.

use std::fmt::Display;
use std::str::FromStr;

use crate::arg_parse_err::ArgParseErr;

/// Parsed `-rotate` argument.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotateGeometry {
    pub degrees: f64,
    /// Rotate only if width > height.
    pub only_if_wider: bool,
    /// Rotate only if width < height.
    pub only_if_taller: bool,
}

impl RotateGeometry {
    pub fn degrees(degrees: f64) -> Self {
        Self {
            degrees,
            only_if_wider: false,
            only_if_taller: false,
        }
    }

    /// The rotation as a number of clockwise quarter turns, if it is a multiple of 90 degrees.
    pub fn quarter_turns(&self) -> Option<u8> {
        let turns = self.degrees / 90.0;
        if turns.fract() != 0.0 || !turns.is_finite() {
            return None;
        }
        Some(turns.rem_euclid(4.0) as u8)
    }
}

impl FromStr for RotateGeometry {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees_str = s.trim_end_matches(['>', '<']);
        let modifiers = &s[degrees_str.len()..];

        let degrees = degrees_str.trim().parse::<f64>()?;
        if !degrees.is_finite() {
            return Err(ArgParseErr::new());
        }

        let mut only_if_wider = false;
        let mut only_if_taller = false;

        for modifier in modifiers.chars() {
            let flag = match modifier {
                '>' => &mut only_if_wider,
                '<' => &mut only_if_taller,
                _ => return Err(ArgParseErr::new()),
            };
            if *flag {
                return Err(ArgParseErr::new());
            }
            *flag = true;
        }

        Ok(RotateGeometry {
            degrees,
            only_if_wider,
            only_if_taller,
        })
    }
}

impl Display for RotateGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees)?;
        if self.only_if_wider {
            f.write_str(">")?;
        }
        if self.only_if_taller {
            f.write_str("<")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_degrees() {
        let rotate = RotateGeometry::from_str("180").unwrap();
        assert_eq!(rotate, RotateGeometry::degrees(180.0));
        assert_eq!(rotate.to_string(), "180");
        assert_eq!(rotate.quarter_turns(), Some(2));
    }

    #[test]
    fn test_conditions() {
        let rotate = RotateGeometry::from_str("90>").unwrap();
        assert!(rotate.only_if_wider);
        assert!(!rotate.only_if_taller);
        assert_eq!(rotate.to_string(), "90>");
        assert!(RotateGeometry::from_str("90>>").is_err());
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(RotateGeometry::degrees(-90.0).quarter_turns(), Some(3));
        assert_eq!(RotateGeometry::degrees(450.0).quarter_turns(), Some(1));
        assert_eq!(RotateGeometry::degrees(0.0).quarter_turns(), Some(0));
        assert_eq!(RotateGeometry::degrees(22.5).quarter_turns(), None);
    }

    #[test]
    fn test_invalid() {
        assert!(RotateGeometry::from_str("").is_err());
        assert!(RotateGeometry::from_str("left").is_err());
        assert!(RotateGeometry::from_str("inf").is_err());
    }
}
