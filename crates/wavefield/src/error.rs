//! Crate-level error types.

use thiserror::Error;

/// Configuration errors caught before a simulation starts.
///
/// Stepping itself never fails: pointer positions outside the lattice simply
/// miss every cell, and the lattice size is fixed for the run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WaveError {
    #[error("lattice must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("courant number {courant} exceeds stability limit {limit}")]
    CourantViolation { courant: f32, limit: f32 },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("background image holds {actual} pixels, expected {expected}")]
    BackgroundSize { expected: usize, actual: usize },
}
