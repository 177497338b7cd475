//! Image index lists as accepted by `-clone` and `-delete`, e.g. `0`, `0-3`, `1,3`, `-1`.

use std::fmt::Display;
use std::str::FromStr;

use crate::arg_parse_err::ArgParseErr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum IndexRange {
    Single(i64),
    Inclusive(i64, i64),
}

/// A set of positions in an image list. Negative indices count from the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    ranges: Vec<IndexRange>,
}

impl ImageSelection {
    pub fn index(index: i64) -> Self {
        Self {
            ranges: vec![IndexRange::Single(index)],
        }
    }

    pub fn range(first: i64, last: i64) -> Self {
        Self {
            ranges: vec![IndexRange::Inclusive(first, last)],
        }
    }

    /// Resolves the selection against a list of `len` images, in the order given.
    ///
    /// Returns `None` if any index falls outside of the list.
    pub fn resolve(&self, len: usize) -> Option<Vec<usize>> {
        let len = len as i64;
        let absolute = |index: i64| -> Option<i64> {
            let index = if index < 0 { len + index } else { index };
            (0..len).contains(&index).then_some(index)
        };
        let mut indices = Vec::new();
        for range in &self.ranges {
            match *range {
                IndexRange::Single(index) => indices.push(absolute(index)? as usize),
                IndexRange::Inclusive(first, last) => {
                    let (first, last) = (absolute(first)?, absolute(last)?);
                    if first <= last {
                        indices.extend((first..=last).map(|i| i as usize));
                    } else {
                        indices.extend((last..=first).rev().map(|i| i as usize));
                    }
                }
            }
        }
        Some(indices)
    }
}

impl FromStr for ImageSelection {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() || !part.is_ascii() {
                return Err(ArgParseErr::new());
            }
            // the first character may be a minus sign belonging to a negative index
            let range = match part[1..].find('-') {
                Some(dash) => {
                    let (first, last) = part.split_at(dash + 1);
                    IndexRange::Inclusive(first.parse()?, last[1..].parse()?)
                }
                None => IndexRange::Single(part.parse()?),
            };
            ranges.push(range);
        }
        Ok(Self { ranges })
    }
}

impl Display for ImageSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match range {
                IndexRange::Single(index) => write!(f, "{index}")?,
                IndexRange::Inclusive(first, last) => write!(f, "{first}-{last}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_range() {
        assert_eq!(ImageSelection::from_str("0"), Ok(ImageSelection::index(0)));
        assert_eq!(
            ImageSelection::from_str("0-3"),
            Ok(ImageSelection::range(0, 3))
        );
        assert_eq!(ImageSelection::range(0, 3).to_string(), "0-3");
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            ImageSelection::range(0, 3).resolve(6),
            Some(vec![0, 1, 2, 3])
        );
        assert_eq!(ImageSelection::index(-1).resolve(6), Some(vec![5]));
        assert_eq!(
            ImageSelection::from_str("1,-2").unwrap().resolve(4),
            Some(vec![1, 2])
        );
        assert_eq!(ImageSelection::from_str("-1--3").unwrap().resolve(4), Some(vec![3, 2, 1]));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(ImageSelection::index(4).resolve(4), None);
        assert_eq!(ImageSelection::index(-5).resolve(4), None);
        assert_eq!(ImageSelection::range(0, 3).resolve(2), None);
    }

    #[test]
    fn test_invalid() {
        assert!(ImageSelection::from_str("").is_err());
        assert!(ImageSelection::from_str("a").is_err());
        assert!(ImageSelection::from_str("1,,2").is_err());
        assert!(ImageSelection::from_str("1-").is_err());
    }
}
