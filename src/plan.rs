use std::{ffi::OsStr, str::FromStr};

use crate::{
    arg_parse_err::ArgParseErr,
    arg_parsers::{
        CropGeometry, Direction, FileArg, Gravity, ImageSelection, Location, ResizeGeometry,
        RotateGeometry,
    },
    args::{Arg, Sign},
    decode::decode,
    encode::encode,
    error::MagickError,
    mirrorize::{DirectiveQueue, Mirrorize},
    operations::{Axis, Directive},
    sequence::ImageSequence,
    utils::filename::numbered_path,
    wm_err,
};

/// One command-line step, in the order it was given.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// An input filename: the image is appended to the current list.
    Read(FileArg),
    Apply(Directive),
}

/// Plan of operations for the whole run
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    steps: Vec<Step>,
    output: FileArg,
}

impl ExecutionPlan {
    pub fn apply_arg(
        &mut self,
        arg: Arg,
        sign: Sign,
        value: Option<&OsStr>,
    ) -> Result<(), MagickError> {
        let arg_name: &'static str = arg.into();
        if arg.needs_value(sign) != value.is_some() {
            return Err(wm_err!("argument requires a value: {sign}{arg_name}"));
        };

        self.apply_arg_inner(arg, sign, value).map_err(|arg_err| {
            wm_err!(
                "{}",
                arg_err.display_with_arg(
                    &format!("{sign}{arg_name}"),
                    &value.unwrap_or_default().to_string_lossy()
                )
            )
        })?;

        Ok(())
    }

    /// Currently this can only fail due to argument parsing.
    /// Split into its own function due to lack of try{} blocks on stable Rust.
    fn apply_arg_inner(
        &mut self,
        arg: Arg,
        sign: Sign,
        value: Option<&OsStr>,
    ) -> Result<(), ArgParseErr> {
        let value = match value {
            Some(value) => value.to_str().ok_or_else(ArgParseErr::new)?,
            None => "",
        };
        let directive = match (arg, sign) {
            (Arg::Append, Sign::Minus) => Directive::Append(Axis::Vertical),
            (Arg::Append, Sign::Plus) => Directive::Append(Axis::Horizontal),
            (Arg::Clone, Sign::Minus) => Directive::Clone(ImageSelection::from_str(value)?),
            (Arg::Clone, Sign::Plus) => Directive::CloneLast,
            (Arg::Crop, _) => Directive::Crop(CropGeometry::from_str(value)?),
            (Arg::Delete, Sign::Minus) => Directive::Delete(ImageSelection::from_str(value)?),
            (Arg::Delete, Sign::Plus) => Directive::Delete(ImageSelection::index(-1)),
            (Arg::Flip, _) => Directive::Flip,
            (Arg::Flop, _) => Directive::Flop,
            (Arg::Gravity, Sign::Minus) => Directive::Gravity(Gravity::parse(value)?),
            (Arg::Gravity, Sign::Plus) => Directive::Gravity(Gravity::default()),
            (Arg::Mirrorize, _) => {
                // unlike the library call, a typo on the command line is an error
                self.mirrorize_towards(Direction::parse(value)?);
                return Ok(());
            }
            (Arg::Repage, _) => Directive::Repage,
            (Arg::Resize, _) => Directive::Resize(ResizeGeometry::from_str(value)?),
            (Arg::Rotate, _) => Directive::Rotate(RotateGeometry::from_str(value)?),
            (Arg::Swap, _) => Directive::Swap,
        };
        self.push_directive(directive);
        Ok(())
    }

    pub fn add_input_file(&mut self, file: FileArg) {
        self.steps.push(Step::Read(file));
    }

    pub fn set_output_file(&mut self, file: FileArg) {
        self.output = file;
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn has_input_files(&self) -> bool {
        self.steps.iter().any(|step| matches!(step, Step::Read(_)))
    }

    pub fn execute(&self) -> Result<(), MagickError> {
        if !self.has_input_files() {
            return Err(wm_err!("no images defined")); // mimics imagemagick
        }
        let mut sequence = ImageSequence::new(Vec::new());
        for step in &self.steps {
            match step {
                Step::Read(file) => sequence.push(decode(&file.location, file.format)?),
                Step::Apply(directive) => directive.execute(&mut sequence)?,
            }
        }
        let images = sequence.finish()?;
        if images.is_empty() {
            return Err(wm_err!("no images defined"));
        }

        for (image, location) in images
            .iter()
            .zip(output_locations(&self.output.location, images.len()))
        {
            encode(image, &location, self.output.format)?;
        }
        Ok(())
    }
}

impl DirectiveQueue for ExecutionPlan {
    fn supports_directives(&self) -> bool {
        true
    }

    fn push_directive(&mut self, directive: Directive) {
        self.steps.push(Step::Apply(directive));
    }
}

/// Several images written to one path get numbered names, starting at 0.
pub(crate) fn output_locations(output: &Location, count: usize) -> Vec<Location> {
    match output {
        Location::Path(path) if count > 1 => (0..count)
            .map(|i| Location::Path(numbered_path(path, i)))
            .collect(),
        _ => vec![output.clone(); count],
    }
}
