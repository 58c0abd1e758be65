//! Error types for the energy-memory library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
///
/// Everything except the I/O and JSON variants is a precondition violation:
/// the call was rejected before any state was touched.
#[derive(Error, Debug)]
pub enum Error {
    /// Coupling matrix is not square
    #[error("Coupling matrix must be square, got {rows}x{cols}")]
    NonSquareCoupling { rows: usize, cols: usize },

    /// Coupling matrix is not symmetric
    #[error("Coupling matrix is not symmetric at ({row}, {col})")]
    AsymmetricCoupling { row: usize, col: usize },

    /// Coupling matrix has a self-coupling term
    #[error("Coupling matrix has non-zero diagonal at unit {0}")]
    SelfCoupling(usize),

    /// Vector or matrix length does not match the model
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A unit value outside the allowed alphabet
    #[error("Invalid unit value {value} at index {index}")]
    InvalidUnitValue { index: usize, value: f64 },

    /// No patterns or no training rows were supplied
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// Invalid hyperparameter or configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if the error was raised by a rejected precondition
    pub fn is_precondition_violation(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Json(_))
    }

    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}
