//! Feature masker
//!
//! Owns a [`MaskConfig`] and the random source that places its bands.

use crate::error::AugmentError;
use crate::mask::{apply_bands, plan_bands, MaskConfig, MaskedBand};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Applies configured frequency/time masking to feature matrices
pub struct FeatureMasker<R = StdRng> {
    config: MaskConfig,
    rng: R,
}

impl FeatureMasker<StdRng> {
    /// Create a masker with a seeded standard RNG
    pub fn from_seed(config: MaskConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FeatureMasker<R> {
    /// Create a masker drawing band positions from `rng`
    pub fn with_rng(config: MaskConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Masking configuration
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Mask `features` in place and hand it back
    pub fn apply<'a>(
        &mut self,
        features: &'a mut Array2<f32>,
    ) -> Result<&'a mut Array2<f32>, AugmentError> {
        self.apply_with_report(features)?;
        Ok(features)
    }

    /// Mask `features` in place and return the bands applied
    pub fn apply_with_report(
        &mut self,
        features: &mut Array2<f32>,
    ) -> Result<Vec<MaskedBand>, AugmentError> {
        let bands = plan_bands(features.dim(), &self.config, &mut self.rng)?;
        apply_bands(features, &bands, self.config.fill)?;
        Ok(bands)
    }

    /// Mask every matrix of a batch.
    ///
    /// Bands for the whole batch are planned first; if any matrix is
    /// rejected, none are modified.
    pub fn apply_batch(&mut self, batch: &mut [Array2<f32>]) -> Result<(), AugmentError> {
        let plans = batch
            .iter()
            .map(|features| plan_bands(features.dim(), &self.config, &mut self.rng))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Masking batch of {} feature matrices", batch.len());
        for (features, bands) in batch.iter_mut().zip(&plans) {
            apply_bands(features, bands, self.config.fill)?;
        }
        Ok(())
    }

    /// Masked copy of `features`; the input is left untouched
    pub fn masked_copy(&mut self, features: &Array2<f32>) -> Result<Array2<f32>, AugmentError> {
        let mut copy = features.clone();
        self.apply(&mut copy)?;
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::Axis;

    fn speech_config() -> MaskConfig {
        MaskConfig::default().with_frequency(20, 2).with_time(20, 10)
    }

    #[test]
    fn test_apply_returns_same_matrix() {
        let mut masker = FeatureMasker::from_seed(speech_config(), 42);
        let mut features = Array2::from_elem((300, 80), 1.0f32);
        let ptr = features.as_ptr();

        let masked = masker.apply(&mut features).unwrap();
        assert_eq!(masked.as_ptr(), ptr);
        assert_eq!(masked.dim(), (300, 80));
    }

    #[test]
    fn test_report_matches_mutation() {
        let mut masker = FeatureMasker::from_seed(speech_config(), 8);
        let mut features = Array2::from_elem((300, 80), 1.0f32);
        let bands = masker.apply_with_report(&mut features).unwrap();

        for band in &bands {
            match band.axis {
                Axis::Frequency => {
                    for c in band.range() {
                        assert!(features.column(c).iter().all(|&v| v == 0.0));
                    }
                }
                Axis::Time => {
                    for t in band.range() {
                        assert!(features.row(t).iter().all(|&v| v == 0.0));
                    }
                }
            }
        }
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut masker = FeatureMasker::from_seed(speech_config(), 1);
        let mut batch = vec![
            Array2::from_elem((50, 40), 1.0f32),
            Array2::from_elem((0, 40), 1.0f32),
        ];

        let result = masker.apply_batch(&mut batch);
        assert_eq!(result, Err(AugmentError::EmptyAxis { axis: Axis::Time }));
        assert!(batch[0].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_masked_copy_leaves_input() {
        let mut masker = FeatureMasker::from_seed(speech_config(), 3);
        let features = Array2::from_elem((100, 80), 1.0f32);
        let masked = masker.masked_copy(&features).unwrap();
        assert!(features.iter().all(|&v| v == 1.0));
        assert_eq!(masked.dim(), features.dim());
    }

    #[test]
    fn test_same_seed_same_output() {
        let features = Array2::from_shape_fn((120, 64), |(t, c)| (t + c) as f32 + 1.0);
        let a = FeatureMasker::from_seed(speech_config(), 77)
            .masked_copy(&features)
            .unwrap();
        let b = FeatureMasker::from_seed(speech_config(), 77)
            .masked_copy(&features)
            .unwrap();
        assert_eq!(a, b);
    }
}
