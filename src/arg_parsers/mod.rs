//! Parsers for specific command-line argument formats,
//! e.g. <https://www.imagemagick.org/Magick++/Geometry.html>

mod crop;
pub use crop::*;
mod direction;
pub use direction::*;
mod geometry;
pub use geometry::*;
mod gravity;
pub use gravity::*;
mod location;
pub use location::*;
mod resize;
pub use resize::*;
mod rotate;
pub use rotate::*;
mod selection;
pub use selection::*;
