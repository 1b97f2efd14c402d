//! Error module for the Rusty Poisson library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq, Clone)]
pub enum PoissonError {
    /// Error for invalid parameters, e.g., a non-positive rate or a rate function exceeding its bound.
    InvalidParameter(String),
    /// Error for statistics which are undefined on the given spike train, e.g., too few spikes.
    InsufficientData(String),
}

impl fmt::Display for PoissonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PoissonError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            PoissonError::InsufficientData(e) => write!(f, "Insufficient data: {}", e),
        }
    }
}

impl Error for PoissonError {}
