use std::num::{ParseFloatError, ParseIntError};

/// Error reporting for argument parsing that mimics imagemagick.
/// Use `.display_with_arg()` to properly present this error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgParseErr {
    pub message: Option<String>,
}

impl ArgParseErr {
    pub fn display_with_arg(&self, arg_name: &str, value: &str) -> String {
        // mimicking imagemagick: if there is a specific message, show it to the user,
        // otherwise simply echo the value the user has passed
        let message = self.message.as_deref().unwrap_or(value);
        format!("invalid argument for option `{arg_name}': {message}")
    }

    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_msg(str: impl ToString) -> Self {
        Self {
            message: Some(str.to_string()),
        }
    }
}

impl From<ParseFloatError> for ArgParseErr {
    fn from(_value: ParseFloatError) -> Self {
        Self::new()
    }
}

impl From<ParseIntError> for ArgParseErr {
    fn from(_value: ParseIntError) -> Self {
        Self::new()
    }
}
