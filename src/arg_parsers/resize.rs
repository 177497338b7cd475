use std::fmt::Display;
use std::str::FromStr;

use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::ExtGeometry;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResizeConstraint {
    #[default]
    Unconstrained,
    /// `<` operator
    OnlyEnlarge,
    /// `>` operator
    OnlyShrink,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ResizeTarget {
    Size {
        width: Option<u32>,
        height: Option<u32>,
        /// `!` operator
        ignore_aspect_ratio: bool,
    },
    /// `%` operator
    Percentage { width: f64, height: f64 },
}

impl Default for ResizeTarget {
    fn default() -> Self {
        Self::Size {
            width: None,
            height: None,
            ignore_aspect_ratio: false,
        }
    }
}

/// "Extended geometry" according to imagemagick docs, as accepted by `-resize`.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct ResizeGeometry {
    pub target: ResizeTarget,
    pub constraint: ResizeConstraint,
}

impl ResizeGeometry {
    /// Resize to exactly `width`x`height`, like `WxH!`.
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            target: ResizeTarget::Size {
                width: Some(width),
                height: Some(height),
                ignore_aspect_ratio: true,
            },
            constraint: ResizeConstraint::Unconstrained,
        }
    }

    /// Fit within `width`x`height` while preserving the aspect ratio, like `WxH`.
    pub fn fit(width: u32, height: u32) -> Self {
        Self {
            target: ResizeTarget::Size {
                width: Some(width),
                height: Some(height),
                ignore_aspect_ratio: false,
            },
            constraint: ResizeConstraint::Unconstrained,
        }
    }

    /// Computes the output dimensions for an image of the given size.
    pub fn dimensions(&self, src_width: u32, src_height: u32) -> (u32, u32) {
        let (src_w, src_h) = (f64::from(src_width), f64::from(src_height));
        let (width, height) = match self.target {
            ResizeTarget::Percentage { width, height } => (
                (src_w * width / 100.0).round(),
                (src_h * height / 100.0).round(),
            ),
            ResizeTarget::Size {
                width,
                height,
                ignore_aspect_ratio,
            } => match (width, height) {
                (None, None) => (src_w, src_h),
                (Some(w), Some(h)) if ignore_aspect_ratio => (f64::from(w), f64::from(h)),
                (Some(w), None) => (f64::from(w), (src_h * f64::from(w) / src_w).round()),
                (None, Some(h)) => ((src_w * f64::from(h) / src_h).round(), f64::from(h)),
                (Some(w), Some(h)) => {
                    // fit inside the box
                    let scale = (f64::from(w) / src_w).min(f64::from(h) / src_h);
                    ((src_w * scale).round(), (src_h * scale).round())
                }
            },
        };
        let (width, height) = ((width as u32).max(1), (height as u32).max(1));

        let enlarging = width > src_width || height > src_height;
        match self.constraint {
            ResizeConstraint::OnlyShrink if enlarging => (src_width, src_height),
            ResizeConstraint::OnlyEnlarge if !enlarging => (src_width, src_height),
            _ => (width, height),
        }
    }
}

impl FromStr for ResizeGeometry {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // TODO: support the @ and ^ operators
        let ext = ExtGeometry::from_str(s)?;
        let flags = ext.flags;
        if flags.at || flags.caret {
            return Err(ArgParseErr::with_msg(format!(
                "unsupported resize geometry `{s}'"
            )));
        }
        if flags.less_than && flags.greater_than {
            return Err(ArgParseErr::with_msg(
                "< and > cannot be specified together",
            ));
        }
        let constraint = if flags.less_than {
            ResizeConstraint::OnlyEnlarge
        } else if flags.greater_than {
            ResizeConstraint::OnlyShrink
        } else {
            ResizeConstraint::Unconstrained
        };

        let (width, height) = (ext.geom.width, ext.geom.height);
        let target = if flags.percent {
            match (width, height) {
                // imagemagick accepts % without a number, which amounts to a no-op
                (None, None) => ResizeTarget::default(),
                // width but not height being specified means the same scaling applies to both axes
                (Some(width), None) => ResizeTarget::Percentage {
                    width,
                    height: width,
                },
                (None, Some(height)) => ResizeTarget::Percentage {
                    width: 100.0,
                    height,
                },
                (Some(width), Some(height)) => ResizeTarget::Percentage { width, height },
            }
        } else {
            ResizeTarget::Size {
                width: width.map(|f| f.round() as u32),
                height: height.map(|f| f.round() as u32),
                ignore_aspect_ratio: flags.exclamation,
            }
        };

        Ok(Self { target, constraint })
    }
}

impl Display for ResizeGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target {
            ResizeTarget::Percentage { width, height } => write!(f, "{width}%x{height}%")?,
            ResizeTarget::Size {
                width,
                height,
                ignore_aspect_ratio,
            } => {
                if let Some(w) = width {
                    write!(f, "{w}")?;
                }
                if let Some(h) = height {
                    write!(f, "x{h}")?;
                }
                if ignore_aspect_ratio {
                    f.write_str("!")?;
                }
            }
        }
        match self.constraint {
            ResizeConstraint::Unconstrained => Ok(()),
            ResizeConstraint::OnlyEnlarge => f.write_str("<"),
            ResizeConstraint::OnlyShrink => f.write_str(">"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let geom = ResizeGeometry::from_str("200x150!").unwrap();
        assert_eq!(geom, ResizeGeometry::exact(200, 150));
        assert_eq!(geom.dimensions(200, 200), (200, 150));
        assert_eq!(geom.to_string(), "200x150!");
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let geom = ResizeGeometry::from_str("100x100").unwrap();
        assert_eq!(geom.dimensions(400, 200), (100, 50));
        let geom = ResizeGeometry::from_str("50").unwrap();
        assert_eq!(geom.dimensions(400, 200), (50, 25));
        let geom = ResizeGeometry::from_str("x50").unwrap();
        assert_eq!(geom.dimensions(400, 200), (100, 50));
    }

    #[test]
    fn test_percentage() {
        let geom = ResizeGeometry::from_str("50%").unwrap();
        assert_eq!(geom.dimensions(200, 100), (100, 50));
        let geom = ResizeGeometry::from_str("50%x25%").unwrap();
        assert_eq!(geom.dimensions(200, 100), (100, 25));
    }

    #[test]
    fn test_constraints() {
        let shrink = ResizeGeometry::from_str("300x300>").unwrap();
        assert_eq!(shrink.dimensions(200, 100), (200, 100));
        let enlarge = ResizeGeometry::from_str("50x50<").unwrap();
        assert_eq!(enlarge.dimensions(200, 100), (200, 100));
        assert!(ResizeGeometry::from_str("50x50<>").is_err());
    }

    #[test]
    fn test_unsupported_operators() {
        assert!(ResizeGeometry::from_str("10000@").is_err());
        assert!(ResizeGeometry::from_str("100x100^").is_err());
    }
}
