// src/config.rs

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Result, SynthError};
use crate::synth::SynthBase;

fn default_tag() -> String {
    "Passthrough".into()
}

fn default_epsilon() -> f64 {
    1.0
}

/// Settings for building a [`SynthBase`], usually read from YAML:
///
/// ```yaml
/// tag: MWEM
/// epsilon: 0.5
/// output_dir: out/
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Where artifacts go; the working directory when absent.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            epsilon: default_epsilon(),
            output_dir: None,
        }
    }
}

impl SynthConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s)
            .map_err(|e| SynthError::Serialization(format!("parsing config: {}", e)))
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SynthError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// A [`SynthBase`] with this tag and epsilon, both checked.
    pub fn build_base(&self) -> Result<SynthBase> {
        SynthBase::with_epsilon(&self.tag, self.epsilon)
    }
}
