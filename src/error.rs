use std::fmt::{Debug, Display};

/// Error type for every fallible operation in the crate.
///
/// Carries a human-readable message in the style of imagemagick diagnostics.
/// Construct it with [`wm_err!`](crate::wm_err) so that the message records where it originated.
#[derive(Clone, PartialEq, Eq)]
pub struct MagickError(pub String);

impl MagickError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl Display for MagickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for MagickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MagickError").field(&self.0).finish()
    }
}

impl std::error::Error for MagickError {}

#[macro_export]
macro_rules! wm_err {
    ($($arg:tt)*) => {
        $crate::error::MagickError(format!(
            "wondermagick: {} @ {}:{}:{}",
            format_args!($($arg)*),
            file!(),
            line!(),
            column!()
        ))
    };
}

#[macro_export]
macro_rules! wm_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::wm_err!("{}", err));
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::MagickError;

    fn fails() -> Result<(), MagickError> {
        let _: u32 = wm_try!("not a number".parse::<u32>());
        Ok(())
    }

    #[test]
    fn test_wm_err_records_location() {
        let err = wm_err!("no images defined");
        assert!(err.message().starts_with("wondermagick: no images defined @ "));
        assert!(err.message().contains("error.rs"));
    }

    #[test]
    fn test_wm_err_formats_arguments() {
        let err = wm_err!("unrecognized option `{}'", "frobnicate");
        assert!(err.to_string().contains("unrecognized option `frobnicate'"));
    }

    #[test]
    fn test_wm_try_converts_foreign_errors() {
        let err = fails().unwrap_err();
        assert!(err.message().contains("invalid digit"));
    }
}
