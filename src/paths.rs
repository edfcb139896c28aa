// src/paths.rs

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::error::{Result, SynthError};

/// Directory used for artifacts when the caller does not give one: the
/// process's current working directory.
pub fn default_path() -> Result<PathBuf> {
    let path = env::current_dir().map_err(|e| SynthError::io(".", e))?;
    info!(
        path = %path.display(),
        "path not specified, saving in current working directory"
    );
    Ok(path)
}

/// `path` if given, else [`default_path`].
pub fn resolve_dir(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_path(),
    }
}
