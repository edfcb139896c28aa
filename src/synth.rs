// src/synth.rs

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::artifact::{check_epsilon, check_tag, write_atomic, ArtifactKind, ArtifactName};
use crate::error::{Result, SynthError};
use crate::paths::resolve_dir;
use crate::schema::{self, Header};
use crate::table::{CanonicalTable, TabularInput};

/// Shared state every synthesizer carries: its algorithm tag, the privacy
/// parameter and the header remembered from the first validated input.
///
/// Concrete synthesizers embed one of these and implement [`Synthesizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthBase {
    tag: String,
    epsilon: Option<f64>,
    header: Option<Header>,
}

impl SynthBase {
    /// `tag` names the algorithm in generated filenames.
    pub fn new(tag: &str) -> Result<Self> {
        check_tag(tag)?;
        Ok(Self {
            tag: tag.to_string(),
            epsilon: None,
            header: None,
        })
    }

    pub fn with_epsilon(tag: &str, epsilon: f64) -> Result<Self> {
        let mut base = Self::new(tag)?;
        base.set_epsilon(epsilon)?;
        Ok(base)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn epsilon(&self) -> Option<f64> {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)?;
        self.epsilon = Some(epsilon);
        Ok(())
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// See [`schema::validate`].
    pub fn validate<I: TabularInput>(&mut self, input: I) -> Result<CanonicalTable> {
        schema::validate(&mut self.header, input)
    }

    /// Full path of the artifact `name` of `kind`, in `path` or the working directory.
    pub fn artifact_path(
        &self,
        name: &str,
        kind: ArtifactKind,
        path: Option<&Path>,
    ) -> Result<PathBuf> {
        let epsilon = self.epsilon.ok_or(SynthError::MissingEpsilon)?;
        let artifact = ArtifactName::new(name, &self.tag, epsilon)?;
        let dir = resolve_dir(path)?;
        Ok(dir.join(artifact.file_name(kind)))
    }

    /// Write `table` as `<name>_<tag>_<epsilon>eps.csv`, without an index column.
    pub fn write_table<I: TabularInput>(
        &self,
        table: I,
        name: &str,
        path: Option<&Path>,
    ) -> Result<PathBuf> {
        let table = table.into_table()?;
        let full_path = self.artifact_path(name, ArtifactKind::Table, path)?;
        write_atomic(&full_path, |w| table.write_csv(w))?;
        info!(
            path = %full_path.display(),
            rows = table.num_rows(),
            "data written to csv"
        );
        Ok(full_path)
    }

    /// Serialize `model` as `<name>_<tag>_<epsilon>eps.p`.
    pub fn write_model<M: Serialize + ?Sized>(
        &self,
        model: &M,
        name: &str,
        path: Option<&Path>,
    ) -> Result<PathBuf> {
        let full_path = self.artifact_path(name, ArtifactKind::Model, path)?;
        let bytes = bincode::serialize(model)
            .map_err(|e| SynthError::Serialization(format!("encoding model: {}", e)))?;
        write_atomic(&full_path, |w| {
            w.write_all(&bytes)
                .map_err(|e| SynthError::io(&full_path, e))
        })?;
        info!(
            path = %full_path.display(),
            bytes = bytes.len(),
            "model written"
        );
        Ok(full_path)
    }
}

/// Reconstruct a synthesizer written by [`Synthesizer::write_model`].
pub fn load_model<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| SynthError::io(path, e))?;
    bincode::deserialize(&bytes).map_err(|e| {
        SynthError::Serialization(format!("decoding model {}: {}", path.display(), e))
    })
}

/// Input checks and persistence shared by all synthesizers.
///
/// Implementors only expose their embedded [`SynthBase`]; everything else is
/// provided. Override [`Synthesizer::check_input_args`] to add
/// algorithm-specific checks that run before the generic schema checks.
pub trait Synthesizer: Serialize {
    fn base(&self) -> &SynthBase;

    fn base_mut(&mut self) -> &mut SynthBase;

    /// Extension point, no-op by default.
    fn check_input_args(&self) -> Result<()> {
        Ok(())
    }

    /// Coerce `input` to a [`CanonicalTable`] and check it against the
    /// remembered header, establishing the header on first use.
    fn validate<I: TabularInput>(&mut self, input: I) -> Result<CanonicalTable> {
        self.check_input_args()?;
        self.base_mut().validate(input)
    }

    fn write_table<I: TabularInput>(
        &self,
        table: I,
        name: &str,
        path: Option<&Path>,
    ) -> Result<&Self> {
        self.base().write_table(table, name, path)?;
        Ok(self)
    }

    /// Serialize the whole synthesizer, including its [`SynthBase`].
    fn write_model(&self, name: &str, path: Option<&Path>) -> Result<&Self> {
        self.base().write_model(self, name, path)?;
        Ok(self)
    }
}
