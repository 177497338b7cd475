//! Kaleidoscope-style mirroring on top of an imagemagick-compatible directive engine.
//!
//! [`ImageHandle`] queues directives the way `gm` does; the [`Mirrorize`] extension
//! trait appends the directive template for one of eight directions. The queue can be
//! rendered in-process with the `image` crate or exported as a `magick` command line.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod arg_parse_err;
pub mod arg_parsers;
pub mod args;
mod decode;
mod encode;
pub mod error;
pub mod handle;
pub mod help;
mod image;
pub mod mirrorize;
pub mod operations;
pub mod plan;
pub mod sequence;
mod utils;

pub use crate::arg_parse_err::ArgParseErr;
pub use crate::arg_parsers::{Direction, Gravity};
pub use crate::error::MagickError;
pub use crate::handle::{Backend, ImageHandle};
pub use crate::image::{Image, Page};
pub use crate::mirrorize::{DirectiveQueue, Mirrorize};
pub use crate::operations::{Axis, Directive};
