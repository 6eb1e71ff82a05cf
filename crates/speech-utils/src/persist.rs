//! Object persistence

use crate::error::UtilsError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Serialize `data` into `path`, replacing any existing file
pub fn save<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<(), UtilsError> {
    let path = path.as_ref();
    let bytes = postcard::to_allocvec(data)?;
    std::fs::write(path, &bytes).map_err(UtilsError::io(path))?;
    debug!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Read back a value written by [`save`]
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, UtilsError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(UtilsError::io(path))?;
    Ok(postcard::from_bytes(&bytes)?)
}
