mod append;
mod crop;
mod flip;
mod list;
mod resize;
mod rotate;

use std::fmt::Display;

use crate::{
    arg_parsers::{CropGeometry, Gravity, ImageSelection, ResizeGeometry, RotateGeometry},
    error::MagickError,
    image::Page,
    sequence::ImageSequence,
};

/// Direction along which images are mirrored or joined.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Left to right: `-flop`, `+append`.
    Horizontal,
    /// Top to bottom: `-flip`, `-append`.
    Vertical,
}

/// A single instruction of the imagemagick command language.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `-gravity <type>`
    Gravity(Gravity),
    /// `-crop <geometry>`
    Crop(CropGeometry),
    /// `+repage`
    Repage,
    /// `(`
    OpenGroup,
    /// `)`
    CloseGroup,
    /// `+clone`
    CloneLast,
    /// `-clone <indexes>`
    Clone(ImageSelection),
    /// `-flip`
    Flip,
    /// `-flop`
    Flop,
    /// `-rotate <degrees>`
    Rotate(RotateGeometry),
    /// `+append` or `-append`
    Append(Axis),
    /// `+swap`
    Swap,
    /// `-delete <indexes>`
    Delete(ImageSelection),
    /// `-resize <geometry>`
    Resize(ResizeGeometry),
}

impl Directive {
    /// The operator as written on the command line, including its sign.
    pub fn operator(&self) -> &'static str {
        match self {
            Directive::Gravity(_) => "-gravity",
            Directive::Crop(_) => "-crop",
            Directive::Repage => "+repage",
            Directive::OpenGroup => "(",
            Directive::CloseGroup => ")",
            Directive::CloneLast => "+clone",
            Directive::Clone(_) => "-clone",
            Directive::Flip => "-flip",
            Directive::Flop => "-flop",
            Directive::Rotate(_) => "-rotate",
            Directive::Append(Axis::Horizontal) => "+append",
            Directive::Append(Axis::Vertical) => "-append",
            Directive::Swap => "+swap",
            Directive::Delete(_) => "-delete",
            Directive::Resize(_) => "-resize",
        }
    }

    /// The argument that follows the operator, if it takes one.
    pub fn value(&self) -> Option<String> {
        match self {
            Directive::Gravity(gravity) => Some(gravity.to_string()),
            Directive::Crop(geom) => Some(geom.to_string()),
            Directive::Clone(selection) | Directive::Delete(selection) => {
                Some(selection.to_string())
            }
            Directive::Rotate(geom) => Some(geom.to_string()),
            Directive::Resize(geom) => Some(geom.to_string()),
            Directive::Repage
            | Directive::OpenGroup
            | Directive::CloseGroup
            | Directive::CloneLast
            | Directive::Flip
            | Directive::Flop
            | Directive::Append(_)
            | Directive::Swap => None,
        }
    }

    /// Command-line tokens for this directive. None of them contain whitespace.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.operator().to_owned()];
        args.extend(self.value());
        args
    }

    pub fn execute(&self, sequence: &mut ImageSequence) -> Result<(), MagickError> {
        tracing::trace!(directive = %self, "executing");
        let gravity = sequence.gravity;
        match self {
            Directive::Gravity(new_gravity) => sequence.gravity = *new_gravity,
            Directive::Crop(geom) => crop::crop(sequence.images_mut("-crop")?, geom, gravity),
            Directive::Repage => {
                for image in sequence.current_mut() {
                    image.page = Page::default();
                }
            }
            Directive::OpenGroup => sequence.open_group(),
            Directive::CloseGroup => sequence.close_group()?,
            Directive::CloneLast => list::clone(sequence, None)?,
            Directive::Clone(selection) => list::clone(sequence, Some(selection))?,
            Directive::Flip => {
                for image in sequence.images_mut("-flip")? {
                    flip::mirror(image, Axis::Vertical);
                }
            }
            Directive::Flop => {
                for image in sequence.images_mut("-flop")? {
                    flip::mirror(image, Axis::Horizontal);
                }
            }
            Directive::Rotate(geom) => {
                for image in sequence.images_mut("-rotate")? {
                    rotate::rotate(image, geom)?;
                }
            }
            Directive::Append(axis) => {
                append::append(sequence.images_mut(self.operator())?, *axis, gravity)?
            }
            Directive::Swap => list::swap(sequence.images_mut("+swap")?)?,
            Directive::Delete(selection) => {
                list::delete(sequence.images_mut("-delete")?, selection)?
            }
            Directive::Resize(geom) => {
                for image in sequence.images_mut("-resize")? {
                    resize::resize(image, geom);
                }
            }
        }
        Ok(())
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.operator())?;
        if let Some(value) = self.value() {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}
