//! Synthetic datasets
//!
//! Small generators used by the demos and tests in place of image or
//! dataset loaders.

mod synthetic;

pub use synthetic::*;
