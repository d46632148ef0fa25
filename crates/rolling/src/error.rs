use core::fmt;

/// Errors that can occur while constructing a [`crate::RollingHash`](crate::RollingHash).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RollingError {
    /// The requested window size was zero.
    ZeroWindow,
}

impl fmt::Display for RollingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWindow => write!(f, "rolling hash window size must be greater than zero"),
        }
    }
}

impl std::error::Error for RollingError {}
