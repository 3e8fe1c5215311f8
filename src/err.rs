use std::fmt;

#[derive(Debug, PartialEq)]
pub enum CustomError {
    WrongArg,
    InvalidFormat,
    Other,
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CustomError::WrongArg => {
                write!(f, "{}", "Wrong arguments")
            },
            CustomError::InvalidFormat => {
                write!(f, "{}", "Invalid format")
            },
            CustomError::Other => {
                write!(f, "{}", "Other")
            }
        }
    }
}

impl std::error::Error for CustomError {}
