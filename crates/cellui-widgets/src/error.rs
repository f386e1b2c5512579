#![forbid(unsafe_code)]

//! Widget errors.

/// Errors raised by window configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// A required argument was missing or unusable.
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for WindowError {}
