//! Per-channel Standardisation

use crate::error::AugmentError;
use crate::mask::Axis;
use ndarray::{Array1, Array2, Axis as NdAxis};

/// Floor for the standard deviation so constant channels map to zero
const MIN_STD_DEV: f32 = 0.0001;

/// Mean of every channel (column), or `None` for a matrix without rows
pub fn channel_means(features: &Array2<f32>) -> Option<Array1<f32>> {
    features.mean_axis(NdAxis(0))
}

/// Population standard deviation of every channel (column)
pub fn channel_std_devs(features: &Array2<f32>) -> Option<Array1<f32>> {
    if features.nrows() == 0 {
        return None;
    }
    Some(features.std_axis(NdAxis(0), 0.0))
}

/// Rescale each channel to zero mean and unit variance, in place
pub fn standardize(features: &mut Array2<f32>) -> Result<&mut Array2<f32>, AugmentError> {
    if features.nrows() == 0 {
        return Err(AugmentError::EmptyAxis { axis: Axis::Time });
    }
    if features.ncols() == 0 {
        return Err(AugmentError::EmptyAxis {
            axis: Axis::Frequency,
        });
    }

    let means = channel_means(features).ok_or(AugmentError::EmptyAxis { axis: Axis::Time })?;
    let std_devs = features
        .std_axis(NdAxis(0), 0.0)
        .mapv(|s| s.max(MIN_STD_DEV));

    for mut row in features.rows_mut() {
        row -= &means;
        row /= &std_devs;
    }
    Ok(features)
}
