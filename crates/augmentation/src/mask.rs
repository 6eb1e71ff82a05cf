//! Frequency and Time Masking
//!
//! Neutralises contiguous bands of a (time × channel) feature matrix. Band
//! positions are drawn from a caller-supplied RNG so a seeded generator
//! reproduces the same bands.

use crate::error::AugmentError;
use crate::normalize::channel_means;
use ndarray::{s, Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// Matrix axis a band is applied along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Rows (time steps)
    Time,
    /// Columns (channels / frequency bins)
    Frequency,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Time => f.write_str("time"),
            Axis::Frequency => f.write_str("frequency"),
        }
    }
}

/// Value written into masked cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskFill {
    /// Zero
    #[default]
    Zero,
    /// Per-channel mean of the matrix before masking
    ChannelMean,
}

/// Frequency masking parameters (`F`, `mf`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyMask {
    /// Upper bound of a band width (inclusive)
    pub max_width: usize,
    /// Number of bands to draw
    pub count: usize,
}

/// Time masking parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimeMask {
    /// Fixed number of bands (`T`, `mt`)
    Count { max_width: usize, count: usize },
    /// Number of bands derived from the masked fraction of the time axis (`T`, `ratio_t`)
    Ratio { max_width: usize, ratio: f64 },
}

impl TimeMask {
    /// Upper bound of a band width (inclusive)
    pub fn max_width(&self) -> usize {
        match *self {
            TimeMask::Count { max_width, .. } | TimeMask::Ratio { max_width, .. } => max_width,
        }
    }

    /// Number of bands to draw for a matrix with `num_time_steps` rows.
    ///
    /// In ratio mode the count is `floor(ratio * num_time_steps / max_width)`,
    /// so the masked steps never exceed `ratio * num_time_steps`.
    pub fn count(&self, num_time_steps: usize) -> Result<usize, AugmentError> {
        match *self {
            TimeMask::Count { count, .. } => Ok(count),
            TimeMask::Ratio { max_width, ratio } => {
                validate_ratio(ratio)?;
                if max_width == 0 {
                    return Ok(0);
                }
                Ok((ratio * num_time_steps as f64 / max_width as f64).floor() as usize)
            }
        }
    }
}

fn validate_ratio(ratio: f64) -> Result<(), AugmentError> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(())
    } else {
        Err(AugmentError::InvalidRatio(ratio))
    }
}

/// Masking configuration for [`mask_features`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Frequency masking, if any
    #[serde(default)]
    pub frequency: Option<FrequencyMask>,
    /// Time masking, if any
    #[serde(default)]
    pub time: Option<TimeMask>,
    /// Neutral value for masked cells
    #[serde(default)]
    pub fill: MaskFill,
}

impl MaskConfig {
    /// Enable frequency masking with band width up to `max_width`, `count` times
    pub fn with_frequency(mut self, max_width: usize, count: usize) -> Self {
        self.frequency = Some(FrequencyMask { max_width, count });
        self
    }

    /// Enable time masking with band width up to `max_width`, `count` times
    pub fn with_time(mut self, max_width: usize, count: usize) -> Self {
        self.time = Some(TimeMask::Count { max_width, count });
        self
    }

    /// Enable time masking covering at most `ratio` of the time axis
    pub fn with_time_ratio(mut self, max_width: usize, ratio: f64) -> Self {
        self.time = Some(TimeMask::Ratio { max_width, ratio });
        self
    }

    /// Set the neutral fill value
    pub fn with_fill(mut self, fill: MaskFill) -> Self {
        self.fill = fill;
        self
    }

    /// Check parameters that do not depend on the matrix shape
    pub fn validate(&self) -> Result<(), AugmentError> {
        if let Some(TimeMask::Ratio { ratio, .. }) = self.time {
            validate_ratio(ratio)?;
        }
        Ok(())
    }
}

/// One applied band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedBand {
    pub axis: Axis,
    pub start: usize,
    pub width: usize,
}

impl MaskedBand {
    /// Indices covered along the band's axis
    pub fn range(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.width)
    }

    /// One past the last index, or `None` when it does not fit in `usize`
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.width)
    }
}

fn check_axis(shape: (usize, usize), axis: Axis, length: usize) -> Result<(), AugmentError> {
    let available = match axis {
        Axis::Time => shape.0,
        Axis::Frequency => shape.1,
    };
    if length == 0 || available == 0 {
        return Err(AugmentError::EmptyAxis { axis });
    }
    if length > available {
        return Err(AugmentError::AxisOutOfBounds {
            axis,
            requested: length,
            available,
        });
    }
    Ok(())
}

/// Draw `count` bands over the first `length` indices of `axis`.
/// Zero-width draws are dropped from the result. Drawing stops early once
/// every index is covered, since later bands cannot change the matrix.
fn draw_bands<R: Rng + ?Sized>(
    axis: Axis,
    length: usize,
    max_width: usize,
    count: usize,
    rng: &mut R,
) -> Vec<MaskedBand> {
    let max_width = max_width.min(length);
    if max_width == 0 {
        return Vec::new();
    }

    let mut bands = Vec::with_capacity(count.min(length));
    let mut covered = vec![false; length];
    let mut uncovered = length;
    for _ in 0..count {
        let width = rng.gen_range(0..=max_width);
        let start = rng.gen_range(0..=length - width);
        if width == 0 {
            continue;
        }
        for flag in &mut covered[start..start + width] {
            if !*flag {
                *flag = true;
                uncovered -= 1;
            }
        }
        bands.push(MaskedBand { axis, start, width });
        if uncovered == 0 {
            break;
        }
    }
    bands
}

fn fill_band(features: &mut Array2<f32>, band: &MaskedBand, means: Option<&Array1<f32>>) {
    debug!(
        "Masking {} band: start={}, width={}",
        band.axis, band.start, band.width
    );
    let range = band.range();
    match band.axis {
        Axis::Frequency => {
            let mut view = features.slice_mut(s![.., range.clone()]);
            match means {
                Some(means) => view.assign(&means.slice(s![range])),
                None => view.fill(0.0),
            }
        }
        Axis::Time => {
            let mut view = features.slice_mut(s![range, ..]);
            match means {
                Some(means) => view.assign(means),
                None => view.fill(0.0),
            }
        }
    }
}

fn mask_axis<R: Rng + ?Sized>(
    features: &mut Array2<f32>,
    axis: Axis,
    length: usize,
    max_width: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<MaskedBand>, AugmentError> {
    check_axis(features.dim(), axis, length)?;
    let bands = draw_bands(axis, length, max_width, count, rng);
    for band in &bands {
        fill_band(features, band, None);
    }
    Ok(bands)
}

/// Zero `count` channel bands, each up to `max_width` wide, within the
/// first `num_channels` columns. Returns the applied bands.
pub fn mask_frequencies<R: Rng + ?Sized>(
    features: &mut Array2<f32>,
    num_channels: usize,
    max_width: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<MaskedBand>, AugmentError> {
    mask_axis(features, Axis::Frequency, num_channels, max_width, count, rng)
}

/// Zero `count` time bands, each up to `max_width` long, within the first
/// `num_time_steps` rows. Returns the applied bands.
pub fn mask_time<R: Rng + ?Sized>(
    features: &mut Array2<f32>,
    num_time_steps: usize,
    max_width: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<MaskedBand>, AugmentError> {
    mask_axis(features, Axis::Time, num_time_steps, max_width, count, rng)
}

/// Validate `config` against a matrix of `shape` and draw every band it asks for.
///
/// Frequency bands are drawn before time bands. Nothing is mutated, so an
/// error here leaves the caller's data untouched.
pub fn plan_bands<R: Rng + ?Sized>(
    shape: (usize, usize),
    config: &MaskConfig,
    rng: &mut R,
) -> Result<Vec<MaskedBand>, AugmentError> {
    config.validate()?;
    let (time, channels) = shape;
    let mut bands = Vec::new();

    if let Some(freq) = config.frequency {
        check_axis(shape, Axis::Frequency, channels)?;
        bands.extend(draw_bands(
            Axis::Frequency,
            channels,
            freq.max_width,
            freq.count,
            rng,
        ));
    }

    if let Some(time_mask) = config.time {
        check_axis(shape, Axis::Time, time)?;
        let count = time_mask.count(time)?;
        bands.extend(draw_bands(
            Axis::Time,
            time,
            time_mask.max_width(),
            count,
            rng,
        ));
    }

    Ok(bands)
}

/// Write planned bands into `features` using `fill`.
///
/// Every band is bounds-checked before the first one is written.
pub fn apply_bands(
    features: &mut Array2<f32>,
    bands: &[MaskedBand],
    fill: MaskFill,
) -> Result<(), AugmentError> {
    if bands.is_empty() {
        return Ok(());
    }
    for band in bands {
        let end = band.end().ok_or(AugmentError::AxisOutOfBounds {
            axis: band.axis,
            requested: usize::MAX,
            available: match band.axis {
                Axis::Time => features.nrows(),
                Axis::Frequency => features.ncols(),
            },
        })?;
        check_axis(features.dim(), band.axis, end.max(1))?;
    }
    let means = match fill {
        MaskFill::Zero => None,
        MaskFill::ChannelMean => channel_means(features),
    };
    for band in bands {
        fill_band(features, band, means.as_ref());
    }
    Ok(())
}

/// Apply frequency and/or time masking as configured.
///
/// Mutates `features` in place and hands the same matrix back for chaining;
/// copy beforehand to keep the original.
pub fn mask_features<'a, R: Rng + ?Sized>(
    features: &'a mut Array2<f32>,
    config: &MaskConfig,
    rng: &mut R,
) -> Result<&'a mut Array2<f32>, AugmentError> {
    let bands = plan_bands(features.dim(), config, rng)?;
    apply_bands(features, &bands, config.fill)?;
    Ok(features)
}
