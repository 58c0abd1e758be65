//! Utility module for common operations
//!
//! This module provides mathematical helpers used throughout the library.

pub mod math;

pub use math::*;
