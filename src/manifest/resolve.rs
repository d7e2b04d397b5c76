//! Manifest + data directory → ordered output list.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashSet;

use super::Manifest;
use crate::core::{BuildError, BuildResult, ContentKind};
use crate::debug;
use crate::emit::symbol_name;

/// Where an output was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Bundled from the manifest's inputs
    Manifest,
    /// Pre-built file found in the data directory, embedded as-is
    Loose,
}

impl Origin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::Loose => "loose",
        }
    }
}

/// One output to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// File name of the artifact; also the URL path without leading `/`
    pub name: String,
    /// Absolute input paths, in concatenation order
    pub inputs: Vec<PathBuf>,
    pub kind: ContentKind,
    pub origin: Origin,
}

impl ResolvedOutput {
    fn declared(name: &str, inputs: &[String], source_dir: &Path) -> Self {
        Self {
            name: name.to_owned(),
            inputs: inputs.iter().map(|input| source_dir.join(input)).collect(),
            kind: ContentKind::from_name(name),
            origin: Origin::Manifest,
        }
    }

    fn loose(name: String, data_dir: &Path) -> Self {
        Self {
            inputs: vec![data_dir.join(&name)],
            kind: ContentKind::from_name(&name),
            origin: Origin::Loose,
            name,
        }
    }

    /// Path of the bundled (or pre-built) artifact.
    pub fn artifact(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.name)
    }

    pub fn url(&self) -> String {
        format!("/{}", self.name)
    }

    /// C identifier of the embedded array, shared by header and table.
    pub fn symbol(&self) -> String {
        symbol_name(&self.name)
    }
}

/// Resolve every output of the build.
///
/// Manifest outputs come first in declaration order, followed by the files
/// of `data_dir` the manifest does not declare, sorted by name. A missing
/// data directory contributes nothing.
pub fn resolve(
    manifest: &Manifest,
    source_dir: &Path,
    data_dir: &Path,
) -> BuildResult<Vec<ResolvedOutput>> {
    let mut outputs: Vec<ResolvedOutput> = manifest
        .entries()
        .map(|(name, inputs)| ResolvedOutput::declared(name, inputs, source_dir))
        .collect();

    let declared: FxHashSet<&str> = manifest.names().collect();
    let loose = list_loose(data_dir)?
        .into_iter()
        .filter(|name| !declared.contains(name.as_str()))
        .map(|name| ResolvedOutput::loose(name, data_dir));
    outputs.extend(loose);

    Ok(outputs)
}

/// Sorted regular-file names of `dir`.
fn list_loose(dir: &Path) -> BuildResult<Vec<String>> {
    let data_dir_err = |source| BuildError::DataDir {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("resolve"; "{} does not exist, no loose files", dir.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(data_dir_err(err)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(data_dir_err)?;
        // Follows symlinks, unlike `DirEntry::file_type`
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!("resolve"; "skipping non UTF-8 name {:?}", entry.file_name());
            continue;
        };
        names.push(name);
    }
    names.sort_unstable();
    Ok(names)
}
