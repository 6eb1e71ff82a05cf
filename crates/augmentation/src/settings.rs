//! Augmentation settings

use crate::error::AugmentError;
use crate::mask::{FrequencyMask, MaskConfig, MaskFill, TimeMask};
use crate::masker::FeatureMasker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable prefix for overrides (`AUGMENT__TIME__RATIO=0.2`)
pub const ENV_PREFIX: &str = "AUGMENT";

/// Augmentation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AugmentationConfig {
    /// Frequency masking (`F`, `mf`)
    #[serde(default)]
    pub frequency: Option<FrequencyMask>,

    /// Time masking (`T` with `mt` or `ratio_t`)
    #[serde(default)]
    pub time: Option<TimeMask>,

    /// Neutral value for masked cells
    #[serde(default)]
    pub fill: MaskFill,

    /// RNG seed; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AugmentationConfig {
    /// Two frequency bands up to 20 channels wide, time bands up to 40 steps
    /// covering at most 30% of the utterance
    pub fn speech_default() -> Self {
        Self {
            frequency: Some(FrequencyMask {
                max_width: 20,
                count: 2,
            }),
            time: Some(TimeMask::Ratio {
                max_width: 40,
                ratio: 0.3,
            }),
            ..Default::default()
        }
    }

    /// Load from an optional file, then apply `AUGMENT__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, AugmentError> {
        Self::load_from(path, Self::environment())
    }

    /// Same as [`load`](Self::load), with overrides taken from `vars`
    /// instead of the process environment
    pub fn load_with_env<I>(path: Option<&Path>, vars: I) -> Result<Self, AugmentError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = Self::environment().source(Some(vars.into_iter().collect()));
        Self::load_from(path, env)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn load_from(path: Option<&Path>, env: config::Environment) -> Result<Self, AugmentError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            info!("Loading augmentation config from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder.add_source(env).build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Masking parameters without the seed
    pub fn mask_config(&self) -> MaskConfig {
        MaskConfig {
            frequency: self.frequency,
            time: self.time,
            fill: self.fill,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AugmentError> {
        self.mask_config().validate()
    }

    /// Build a masker seeded from `seed` or OS entropy
    pub fn into_masker(self) -> Result<FeatureMasker<StdRng>, AugmentError> {
        self.validate()?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(FeatureMasker::with_rng(self.mask_config(), rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            &serde_json::json!({
                "frequency": { "max_width": 20, "count": 2 },
                "time": { "mode": "ratio", "max_width": 40, "ratio": 0.3 },
                "fill": "channel_mean"
            })
            .to_string(),
        );

        let config = AugmentationConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            config.frequency,
            Some(FrequencyMask {
                max_width: 20,
                count: 2
            })
        );
        assert_eq!(
            config.time,
            Some(TimeMask::Ratio {
                max_width: 40,
                ratio: 0.3
            })
        );
        assert_eq!(config.fill, MaskFill::ChannelMean);
    }

    #[test]
    fn test_negative_width_rejected() {
        let file = write_config(r#"{ "frequency": { "max_width": -5, "count": 2 } }"#);
        let result = AugmentationConfig::load(Some(file.path()));
        assert!(matches!(result, Err(AugmentError::Config(_))));
    }

    #[test]
    fn test_out_of_range_ratio_rejected() {
        let file = write_config(r#"{ "time": { "mode": "ratio", "max_width": 40, "ratio": 1.5 } }"#);
        let result = AugmentationConfig::load(Some(file.path()));
        assert_eq!(result, Err(AugmentError::InvalidRatio(1.5)));
    }

    #[test]
    fn test_env_override() {
        let file = write_config(r#"{ "seed": 1, "fill": "zero" }"#);
        let vars = [
            ("AUGMENT__SEED".to_string(), "99".to_string()),
            ("AUGMENT__FILL".to_string(), "channel_mean".to_string()),
            ("OTHER__SEED".to_string(), "5".to_string()),
        ];

        let config = AugmentationConfig::load_with_env(Some(file.path()), vars).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.fill, MaskFill::ChannelMean);
    }

    #[test]
    fn test_seeded_maskers_agree() {
        let config = AugmentationConfig {
            seed: Some(1234),
            ..AugmentationConfig::speech_default()
        };
        let mut a = config.clone().into_masker().unwrap();
        let mut b = config.into_masker().unwrap();

        let mut x = ndarray::Array2::from_elem((300, 80), 1.0f32);
        let mut y = x.clone();
        a.apply(&mut x).unwrap();
        b.apply(&mut y).unwrap();
        assert_eq!(x, y);
    }
}
