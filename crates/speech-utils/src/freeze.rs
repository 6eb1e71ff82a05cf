//! Layer freezing

use crate::error::UtilsError;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Model whose layers can be toggled trainable
pub trait LayeredModel {
    /// Names of all layers
    fn layer_names(&self) -> Vec<String>;

    /// Set the trainable flag of `layer`; returns false when no such layer exists
    fn set_trainable(&mut self, layer: &str, trainable: bool) -> bool;
}

/// Layer names recorded in a saved weights file
pub trait WeightsManifest {
    fn layer_names(&self) -> Result<Vec<String>, UtilsError>;
}

impl WeightsManifest for [String] {
    fn layer_names(&self) -> Result<Vec<String>, UtilsError> {
        Ok(self.to_vec())
    }
}

impl WeightsManifest for Vec<String> {
    fn layer_names(&self) -> Result<Vec<String>, UtilsError> {
        Ok(self.clone())
    }
}

/// Mark every layer named in both `model` and `manifest` non-trainable.
/// Returns the frozen layer names, sorted.
pub fn freeze<M, W>(model: &mut M, manifest: &W) -> Result<Vec<String>, UtilsError>
where
    M: LayeredModel + ?Sized,
    W: WeightsManifest + ?Sized,
{
    let saved: BTreeSet<String> = manifest.layer_names()?.into_iter().collect();
    let present: BTreeSet<String> = model.layer_names().into_iter().collect();

    let frozen: Vec<String> = saved.intersection(&present).cloned().collect();
    for layer in &frozen {
        if !model.set_trainable(layer, false) {
            warn!("Layer {} disappeared before it could be frozen", layer);
        }
    }
    info!("Froze {} of {} layers", frozen.len(), present.len());
    Ok(frozen)
}
