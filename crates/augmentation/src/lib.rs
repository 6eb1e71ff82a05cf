//! Speech Feature Augmentation
//!
//! Frequency and time masking of (time × channel) feature matrices, used as
//! a regularising augmentation step before model training.

mod error;
mod mask;
mod masker;
mod normalize;
mod settings;

pub use error::AugmentError;
pub use mask::{
    apply_bands, mask_features, mask_frequencies, mask_time, plan_bands, Axis, FrequencyMask,
    MaskConfig, MaskFill, MaskedBand, TimeMask,
};
pub use masker::FeatureMasker;
pub use normalize::{channel_means, channel_std_devs, standardize};
pub use settings::{AugmentationConfig, ENV_PREFIX};
