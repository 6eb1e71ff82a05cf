//! Pretrained model lookup and loading
//!
//! A model directory holds `configuration.yaml`, `alphabet.txt` and,
//! optionally, `weights.hdf5`. Pretrained models live under
//! `<root>/models/<name>`.

use crate::error::UtilsError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Names of bundled pretrained models
pub const PRETRAINED_MODELS: &[&str] = &["pl"];

pub const MODELS_DIR: &str = "models";
pub const CONFIG_FILE: &str = "configuration.yaml";
pub const ALPHABET_FILE: &str = "alphabet.txt";
pub const WEIGHTS_FILE: &str = "weights.hdf5";

/// Directory of the pretrained model `name`
pub fn pretrained_model_dir(root: &Path, name: &str) -> Result<PathBuf, UtilsError> {
    if PRETRAINED_MODELS.contains(&name) {
        Ok(root.join(MODELS_DIR).join(name))
    } else {
        Err(UtilsError::UnknownPretrained(name.to_string()))
    }
}

/// Files making up a model directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBundle {
    pub dir: PathBuf,
    pub config_path: PathBuf,
    pub alphabet_path: PathBuf,
    /// Present only when the directory holds saved weights
    pub weights_path: Option<PathBuf>,
}

impl ModelBundle {
    /// Resolve `name_or_dir` (an existing directory or a pretrained model
    /// name) and check the required files are present
    pub fn locate(root: &Path, name_or_dir: &str) -> Result<Self, UtilsError> {
        let candidate = Path::new(name_or_dir);
        let dir = if candidate.is_dir() {
            candidate.to_path_buf()
        } else {
            pretrained_model_dir(root, name_or_dir)?
        };

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(UtilsError::MissingFile { kind: "config", dir });
        }
        let alphabet_path = dir.join(ALPHABET_FILE);
        if !alphabet_path.is_file() {
            return Err(UtilsError::MissingFile {
                kind: "alphabet",
                dir,
            });
        }
        let weights_path = Some(dir.join(WEIGHTS_FILE)).filter(|p| p.is_file());

        Ok(Self {
            dir,
            config_path,
            alphabet_path,
            weights_path,
        })
    }
}

/// Builds a model from its configuration and alphabet, and loads weights into it
pub trait ModelLoader {
    type Model;

    /// Construct an untrained model
    fn construct(&self, config_path: &Path, alphabet_path: &Path)
        -> Result<Self::Model, UtilsError>;

    /// Load saved weights into `model`
    fn load_weights(&self, model: &mut Self::Model, weights_path: &Path) -> Result<(), UtilsError>;
}

/// Construct the model at `name_or_dir`, loading weights when the directory has them
pub fn load<L: ModelLoader>(
    root: &Path,
    name_or_dir: &str,
    loader: &L,
) -> Result<L::Model, UtilsError> {
    let bundle = ModelBundle::locate(root, name_or_dir)?;
    info!("Loading model from {}", bundle.dir.display());

    let mut model = loader.construct(&bundle.config_path, &bundle.alphabet_path)?;
    match &bundle.weights_path {
        Some(weights) => loader.load_weights(&mut model, weights)?,
        None => warn!("No weights in {}, model is untrained", bundle.dir.display()),
    }
    Ok(model)
}

/// Weights file for `file_or_name`: an existing file as-is, otherwise the
/// weights of the pretrained model with that name
pub fn resolve_weights(root: &Path, file_or_name: &str) -> Result<PathBuf, UtilsError> {
    let candidate = Path::new(file_or_name);
    if candidate.is_file() {
        return Ok(candidate.to_path_buf());
    }
    Ok(pretrained_model_dir(root, file_or_name)?.join(WEIGHTS_FILE))
}

/// Wrap a weight-consuming operation so it also accepts pretrained model names
pub fn with_resolved_weights<M, T, F>(
    root: PathBuf,
    op: F,
) -> impl Fn(&mut M, &str) -> Result<T, UtilsError>
where
    F: Fn(&mut M, &Path) -> Result<T, UtilsError>,
{
    move |model: &mut M, file_or_name: &str| {
        let weights = resolve_weights(&root, file_or_name)?;
        op(model, &weights)
    }
}
