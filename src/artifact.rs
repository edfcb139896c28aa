// src/artifact.rs

use glob::{glob, Pattern};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::error::{Result, SynthError};

/// What an artifact holds, which fixes its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Delimited text dataset
    Table,
    /// Serialized synthesizer
    Model,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Table => "csv",
            ArtifactKind::Model => "p",
        }
    }
}

/// The parts of a generated artifact filename:
/// `<name>_<tag>_<epsilon>eps.<ext>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactName {
    pub name: String,
    pub tag: String,
    pub epsilon: f64,
}

impl ArtifactName {
    pub fn new(name: &str, tag: &str, epsilon: f64) -> Result<Self> {
        check_name(name)?;
        check_tag(tag)?;
        check_epsilon(epsilon)?;
        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
            epsilon,
        })
    }

    pub fn file_name(&self, kind: ArtifactKind) -> String {
        format!(
            "{}_{}_{}eps.{}",
            self.name,
            self.tag,
            format_epsilon(self.epsilon),
            kind.extension()
        )
    }

    /// Split a generated filename back into its parts.
    ///
    /// The tag never contains `_`, so the last two underscores delimit it;
    /// everything before them is the name.
    pub fn parse(file_name: &str) -> Option<(Self, ArtifactKind)> {
        let (stem, ext) = file_name.rsplit_once('.')?;
        let kind = match ext {
            "csv" => ArtifactKind::Table,
            "p" => ArtifactKind::Model,
            _ => return None,
        };
        let stem = stem.strip_suffix("eps")?;
        let (rest, eps) = stem.rsplit_once('_')?;
        let (name, tag) = rest.rsplit_once('_')?;
        let epsilon = eps.parse::<f64>().ok()?;
        Self::new(name, tag, epsilon).ok().map(|a| (a, kind))
    }
}

/// Render epsilon so whole numbers keep a decimal point (`1.0`, not `1`).
///
/// Extreme magnitudes use Rust's exponent form (`1e-5`, `1e16`), not the
/// `1e-05` / `1e+16` form of the Python naming, so filenames for those
/// values differ between the two.
pub fn format_epsilon(epsilon: f64) -> String {
    format!("{:?}", epsilon)
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(SynthError::InvalidEpsilon(epsilon))
    }
}

pub(crate) fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SynthError::InvalidName(name.into(), "must not be empty"));
    }
    if name.contains(['/', '\\']) {
        return Err(SynthError::InvalidName(
            name.into(),
            "must not contain a path separator",
        ));
    }
    Ok(())
}

pub(crate) fn check_tag(tag: &str) -> Result<()> {
    check_name(tag)?;
    if tag.contains('_') {
        return Err(SynthError::InvalidName(tag.into(), "tag must not contain '_'"));
    }
    Ok(())
}

/// Write an artifact atomically: to a hidden tmp sibling, then rename over `path`.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let file = File::create(&tmp_path).map_err(|e| SynthError::io(&tmp_path, e))?;
    let mut out = BufWriter::new(file);

    let written = write(&mut out).and_then(|_| {
        out.flush().map_err(|e| SynthError::io(&tmp_path, e))?;
        Ok(())
    });
    drop(out);
    if let Err(e) = written {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), error = %rm, "could not remove partial artifact");
        }
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| SynthError::io(path, e))
}

/// List artifacts of `kind` in `dir` whose names follow the generated scheme.
pub fn find_artifacts<P: AsRef<Path>>(
    dir: P,
    kind: ArtifactKind,
) -> Result<Vec<(PathBuf, ArtifactName)>> {
    let dir = Pattern::escape(&dir.as_ref().display().to_string());
    let pattern = format!("{}/*eps.{}", dir, kind.extension());
    let entries = glob(&pattern)
        .map_err(|e| SynthError::InvalidName(pattern.clone(), e.msg))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            SynthError::io(path, e.into_error())
        })?;
        let parsed = entry
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(ArtifactName::parse);
        if let Some((name, k)) = parsed {
            if k == kind {
                found.push((entry, name));
            }
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
