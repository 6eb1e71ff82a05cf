//! Augmentation Error Types

use crate::mask::Axis;
use thiserror::Error;

/// Errors raised while configuring or applying feature masking
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AugmentError {
    /// Axis has no elements to mask
    #[error("{axis} axis is empty")]
    EmptyAxis { axis: Axis },

    /// Requested axis length exceeds the matrix dimension
    #[error("{axis} axis length {requested} exceeds matrix dimension {available}")]
    AxisOutOfBounds {
        axis: Axis,
        requested: usize,
        available: usize,
    },

    /// Time ratio outside [0, 1]
    #[error("Time mask ratio {0} is outside [0, 1]")]
    InvalidRatio(f64),

    /// Configuration could not be loaded
    #[error("Invalid augmentation config: {0}")]
    Config(String),
}

impl From<config::ConfigError> for AugmentError {
    fn from(err: config::ConfigError) -> Self {
        AugmentError::Config(err.to_string())
    }
}
