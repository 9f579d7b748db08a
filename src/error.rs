use std::error;
use std::fmt;
use std::io;
use std::result;

use crate::ast::Source;

pub type Result<T> = result::Result<T, MixinError>;

#[derive(Debug, PartialEq)]
pub struct MixinError {
    pub message: String,
    pub kind: ErrorKind,
    pub location: Option<Source>,
}

impl fmt::Display for MixinError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{:?} at {}: {}", self.kind, location, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl error::Error for MixinError {}

impl From<io::Error> for MixinError {
    fn from(err: io::Error) -> MixinError {
        MixinError {
            location: None,
            message: err.to_string(),
            kind: ErrorKind::IoError,
        }
    }
}

impl From<glob::PatternError> for MixinError {
    fn from(err: glob::PatternError) -> MixinError {
        MixinError {
            location: None,
            message: err.to_string(),
            kind: ErrorKind::IoError,
        }
    }
}

impl From<glob::GlobError> for MixinError {
    fn from(err: glob::GlobError) -> MixinError {
        MixinError {
            location: None,
            message: err.to_string(),
            kind: ErrorKind::IoError,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ErrorKind {
    IoError,
    SyntaxError,
    UndefinedMixin,
    InvalidMixinReturn,
    InvalidDefinitionFile,
}
