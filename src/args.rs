//! Imagemagick argument parsing.
//!
//! We cannot use an argument parsing library because imagemagick arguments are unconventional:
//! they are prefixed by - or +, not --. So we need to hand-roll our own parser.

use std::{
    ffi::{OsStr, OsString},
    fmt::Display,
    str::FromStr,
};

use crate::{
    arg_parsers::FileArg, error::MagickError, mirrorize::DirectiveQueue, operations::Directive,
    plan::ExecutionPlan, wm_err,
};

use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Arg {
    Append,
    Clone,
    Crop,
    Delete,
    Flip,
    Flop,
    Gravity,
    Mirrorize,
    Repage,
    Resize,
    Rotate,
    Swap,
}

/// The prefix of an option. Many imagemagick operators mean something different with `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Minus,
    Plus,
}

impl Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Minus => f.write_str("-"),
            Sign::Plus => f.write_str("+"),
        }
    }
}

impl Arg {
    /// Whether the operator exists with this sign.
    pub fn accepts(&self, sign: Sign) -> bool {
        match self {
            Arg::Append | Arg::Clone | Arg::Delete | Arg::Gravity => true,
            // -repage and -swap take arguments we do not support
            Arg::Repage | Arg::Swap => sign == Sign::Plus,
            Arg::Crop | Arg::Flip | Arg::Flop | Arg::Mirrorize | Arg::Resize | Arg::Rotate => {
                sign == Sign::Minus
            }
        }
    }

    pub fn needs_value(&self, sign: Sign) -> bool {
        match self {
            Arg::Append | Arg::Flip | Arg::Flop | Arg::Repage | Arg::Swap => false,
            // +clone, +delete and +gravity act on the last image or reset the setting
            Arg::Clone | Arg::Delete | Arg::Gravity => sign == Sign::Minus,
            Arg::Crop | Arg::Mirrorize | Arg::Resize | Arg::Rotate => true,
        }
    }

    /// The sign the operator is usually written with.
    pub fn usual_sign(&self) -> Sign {
        match self {
            Arg::Repage | Arg::Swap => Sign::Plus,
            _ => Sign::Minus,
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Append => "join images top to bottom (+append: left to right)",
            Arg::Clone => "copy images from the enclosing list (+clone: the last one)",
            Arg::Crop => "cut out a rectangular region of the image",
            Arg::Delete => "delete images from the list (+delete: the last one)",
            Arg::Flip => "flip image in the vertical direction",
            Arg::Flop => "flop image in the horizontal direction",
            Arg::Gravity => "horizontal and vertical placement for crop and append",
            Arg::Mirrorize => "mirror the image towards a side or corner",
            Arg::Repage => "reset the virtual canvas and offset",
            Arg::Resize => "resize the image",
            Arg::Rotate => "apply rotation to the image, in multiples of 90 degrees",
            Arg::Swap => "swap the last two images in the list",
        }
    }
}

pub fn parse_args(mut args: Vec<OsString>) -> Result<ExecutionPlan, MagickError> {
    // maybe_print_help should take care of it, but this won't hurt
    if args.len() <= 1 {
        return Err(wm_err!("No command-line arguments provided"));
    }

    // imagemagick seems to first determine the output filename, and complains if it's not right.
    let output_filename = args.pop().unwrap_or_default();
    // imagemagick rejects output filenames that look like arguments
    if output_filename != "-"
        && (starts_with_sign(&output_filename) || is_parenthesis(&output_filename))
    {
        return Err(wm_err!(
            "missing an image filename `{}'",
            output_filename.to_string_lossy()
        ));
    }

    let mut plan = ExecutionPlan::default();
    plan.set_output_file(FileArg::parse(&output_filename));

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if raw_arg == "(" {
            plan.push_directive(Directive::OpenGroup);
        } else if raw_arg == ")" {
            plan.push_directive(Directive::CloseGroup);
        } else if raw_arg != "-" && starts_with_sign(&raw_arg) {
            // A file named "-foobar.jpg" will be parsed as an option.
            // Sadly imagemagick does not support the -- convention to separate options and filenames,
            // and there is nothing we can do about it without introducing incompatibility in argument parsing.
            let (sign, string_arg) = sign_and_arg_name(raw_arg)?;
            let arg = Arg::from_str(&string_arg)
                .ok()
                .filter(|arg| arg.accepts(sign))
                .ok_or_else(|| wm_err!("unrecognized option `{sign}{string_arg}'"))?;
            let value = if arg.needs_value(sign) {
                let value = iter
                    .next()
                    .ok_or_else(|| wm_err!("argument requires a value: {sign}{string_arg}"))?;
                Some(value)
            } else {
                None
            };
            plan.apply_arg(arg, sign, value.as_deref())?;
        } else {
            plan.add_input_file(FileArg::parse(&raw_arg));
        }
    }
    if !plan.has_input_files() {
        return Err(wm_err!("no images defined")); // mimics imagemagick
    }
    Ok(plan)
}

fn is_parenthesis(arg: &OsStr) -> bool {
    arg == "(" || arg == ")"
}

/// Checks if the string starts with a `-` or a `+`
fn starts_with_sign(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    let first_byte = bytes.first();
    (first_byte == Some(&b'-') || first_byte == Some(&b'+'))
        // Anything starting with two dashes instead of one is treated as filename
        && bytes.get(1) != Some(&b'-')
}

/// Splits the string into a sign (- or +) and argument name
fn sign_and_arg_name(raw_arg: OsString) -> Result<(Sign, String), MagickError> {
    let string = raw_arg
        .into_string()
        .map_err(|s| wm_err!("unrecognized option `{}'", s.to_string_lossy()))?;
    let mut chars = string.chars();
    let sign = match chars.next() {
        Some('-') => Sign::Minus,
        Some('+') => Sign::Plus,
        _ => return Err(wm_err!("unrecognized option `{string}'")),
    };
    Ok((sign, chars.as_str().to_owned()))
}
