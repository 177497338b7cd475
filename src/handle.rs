//! A gm-style image handle: directives are queued by chained calls and only
//! executed when the image is rendered or written.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use image::DynamicImage;

use crate::{
    arg_parsers::{CropGeometry, FileArg, Gravity, Location, ResizeGeometry, RotateGeometry},
    decode::decode,
    encode::encode,
    error::MagickError,
    image::Image,
    mirrorize::DirectiveQueue,
    operations::Directive,
    plan::output_locations,
    sequence::ImageSequence,
    wm_err,
};

/// The program the queued directives are meant for.
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    #[default]
    ImageMagick,
    /// Lacks parenthesised image lists, so mirrorize leaves the queue alone.
    GraphicsMagick,
}

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Image(Image),
}

#[derive(Debug, Clone)]
pub struct ImageHandle {
    source: Source,
    backend: Backend,
    directives: Vec<Directive>,
}

impl ImageHandle {
    /// The file is not read until the handle is rendered.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(Source::Path(path.as_ref().to_owned()))
    }

    pub fn from_image(pixels: DynamicImage) -> Self {
        Self::new(Source::Image(Image::new(pixels)))
    }

    fn new(source: Source) -> Self {
        Self {
            source,
            backend: Backend::default(),
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn push(&mut self, directive: Directive) -> &mut Self {
        self.push_directive(directive);
        self
    }

    pub fn gravity(&mut self, gravity: Gravity) -> &mut Self {
        self.push(Directive::Gravity(gravity))
    }

    pub fn crop(&mut self, width: u32, height: u32, xoffset: i64, yoffset: i64) -> &mut Self {
        self.push(Directive::Crop(CropGeometry::pixels(
            width, height, xoffset, yoffset,
        )))
    }

    pub fn crop_percent(&mut self, width: f64, height: f64) -> &mut Self {
        self.push(Directive::Crop(CropGeometry::percent(width, height)))
    }

    /// With `ignore_aspect_ratio` the result is exactly `width`x`height`,
    /// otherwise the image is fitted inside that box.
    pub fn resize(&mut self, width: u32, height: u32, ignore_aspect_ratio: bool) -> &mut Self {
        let geometry = if ignore_aspect_ratio {
            ResizeGeometry::exact(width, height)
        } else {
            ResizeGeometry::fit(width, height)
        };
        self.push(Directive::Resize(geometry))
    }

    pub fn repage(&mut self) -> &mut Self {
        self.push(Directive::Repage)
    }

    pub fn flip(&mut self) -> &mut Self {
        self.push(Directive::Flip)
    }

    pub fn flop(&mut self) -> &mut Self {
        self.push(Directive::Flop)
    }

    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.push(Directive::Rotate(RotateGeometry::degrees(degrees)))
    }

    /// The queued directives as command-line tokens.
    pub fn args(&self) -> Vec<String> {
        self.directives.iter().flat_map(Directive::to_args).collect()
    }

    /// The external command that would apply the queue, `magick` or `gm convert`.
    ///
    /// Only handles opened from a file can be passed to another program.
    pub fn command(&self, output: impl AsRef<Path>) -> Result<Command, MagickError> {
        let Source::Path(input) = &self.source else {
            return Err(wm_err!(
                "an in-memory image cannot be handed to an external command"
            ));
        };
        let mut command = match self.backend {
            Backend::ImageMagick => Command::new("magick"),
            Backend::GraphicsMagick => {
                let mut command = Command::new("gm");
                command.arg("convert");
                command
            }
        };
        command.arg(input).args(self.args()).arg(output.as_ref());
        Ok(command)
    }

    /// Runs the queue in-process. Most directive sequences end with a single image,
    /// but tile crops and unbalanced lists can leave several.
    pub fn render(&self) -> Result<Vec<Image>, MagickError> {
        let image = match &self.source {
            Source::Path(path) => decode(&Location::Path(path.clone()), None)?,
            Source::Image(image) => image.clone(),
        };
        let mut sequence = ImageSequence::new(vec![image]);
        sequence.run(&self.directives)?;
        sequence.finish()
    }

    /// Renders and encodes. The format follows the extension or a `png:` style prefix;
    /// several images are written as `name-0.ext`, `name-1.ext` and so on.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), MagickError> {
        let output = FileArg::parse(path.as_ref().as_os_str());
        let images = self.render()?;
        for (image, location) in images
            .iter()
            .zip(output_locations(&output.location, images.len()))
        {
            encode(image, &location, output.format)?;
        }
        Ok(())
    }
}

impl DirectiveQueue for ImageHandle {
    fn supports_directives(&self) -> bool {
        self.backend == Backend::ImageMagick
    }

    fn push_directive(&mut self, directive: Directive) {
        tracing::trace!(%directive, "queued");
        self.directives.push(directive);
    }
}
