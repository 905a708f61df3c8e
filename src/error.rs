use std::fmt;

use thiserror::Error;

/// The parameter of a map operation that was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Argument {
    Key,
    Value,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Key => f.write_str("key"),
            Argument::Value => f.write_str("value"),
        }
    }
}

/// Errors returned by the checked (`try_*`) map operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A required key or value was absent
    ///
    /// The map never stores an absent value, so a missing value is rejected rather than treated as
    /// a mapping.
    #[error("invalid argument: {0} must not be absent")]
    InvalidArgument(Argument),
}

pub type Result<T> = std::result::Result<T, Error>;
