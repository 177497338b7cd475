use std::fmt::Display;
use std::str::FromStr;

use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::{ExtGeometry, Geometry};

/// Parsed `-crop` argument.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CropGeometry {
    pub geom: Geometry,
    /// `%`: width and height are percentages of the image size.
    pub percentage_mode: bool,
    /// `!`: reset the virtual canvas of the result, like `+repage` would.
    pub repage: bool,
}

impl CropGeometry {
    /// A crop of `width`x`height` pixels at the given offset.
    pub fn pixels(width: u32, height: u32, xoffset: i64, yoffset: i64) -> Self {
        Self {
            geom: Geometry {
                width: Some(f64::from(width)),
                height: Some(f64::from(height)),
                xoffset: Some(xoffset as f64),
                yoffset: Some(yoffset as f64),
            },
            percentage_mode: false,
            repage: false,
        }
    }

    /// A crop of a percentage of the image size, at offset `+0+0`.
    pub fn percent(width: f64, height: f64) -> Self {
        Self {
            geom: Geometry {
                width: Some(width),
                height: Some(height),
                xoffset: Some(0.0),
                yoffset: Some(0.0),
            },
            percentage_mode: true,
            repage: false,
        }
    }

    /// imagemagick slices the image into many smaller images if you use "-crop 50x50",
    /// you need "-crop 50x50+0" for a single image.
    /// It's not possible to express a yoffset without specifying an xoffset, so no need to check both.
    pub fn slice_into_many(&self) -> bool {
        self.geom.xoffset.is_none()
    }

    /// Resolves the size of the cropped region for an image of the given dimensions.
    pub fn region_size(&self, columns: u32, rows: u32) -> (u32, u32) {
        // a lone number applies to both dimensions
        let width = self.geom.width;
        let height = self.geom.height.or(width);
        let resolve = |value: Option<f64>, extent: u32| -> u32 {
            match value {
                None => extent,
                Some(v) if self.percentage_mode => {
                    (f64::from(extent) * v / 100.0 + 0.5).floor() as u32
                }
                Some(v) => v.round() as u32,
            }
        };
        // a zero-sized dimension means "all of it"
        let w = match resolve(width, columns) {
            0 => columns,
            w => w,
        };
        let h = match resolve(height, rows) {
            0 => rows,
            h => h,
        };
        (w, h)
    }

    pub fn offset(&self) -> (i64, i64) {
        (
            self.geom.xoffset.unwrap_or(0.0).round() as i64,
            self.geom.yoffset.unwrap_or(0.0).round() as i64,
        )
    }
}

impl FromStr for CropGeometry {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = ExtGeometry::from_str(s)?;

        // TODO: bug-compatibility with the weird behavior for these technically accepted flags
        // let area_mode = ext.flags.at;
        // let cover_mode = ext.flags.caret;
        // let only_enlarge = ext.flags.less_than;
        // let only_shrink = ext.flags.greater_than;

        if ext.geom.width.is_none() && ext.geom.height.is_none() && ext.geom.xoffset.is_none() {
            return Err(ArgParseErr::new());
        }

        Ok(Self {
            geom: ext.geom,
            percentage_mode: ext.flags.percent,
            repage: ext.flags.exclamation,
        })
    }
}

impl Display for CropGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = if self.percentage_mode { "%" } else { "" };
        if let Some(w) = self.geom.width {
            write!(f, "{w}{unit}")?;
        }
        if let Some(h) = self.geom.height {
            write!(f, "x{h}{unit}")?;
        }
        match (self.geom.xoffset, self.geom.yoffset) {
            (Some(x), Some(y)) => write!(f, "{x:+}{y:+}")?,
            (Some(x), None) => write!(f, "{x:+}")?,
            (None, Some(y)) => write!(f, "+0{y:+}")?,
            (None, None) => {}
        }
        if self.repage {
            f.write_str("!")?;
        }
        Ok(())
    }
}
