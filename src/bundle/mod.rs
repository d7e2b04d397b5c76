//! Bundling: read the inputs of one output, minify, concatenate, persist.
//!
//! The artifact for output `name` is `<data_dir>/<name>`. Loose outputs
//! already are their own artifact and are never rewritten.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{BuildError, BuildResult, ContentKind};
use crate::manifest::{Origin, ResolvedOutput};
use crate::minify::{Minifier, MinifyError, is_preminified};
use crate::utils::fs::write_atomic;
use crate::{debug, log};

/// Concatenated, minified content of one output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub name: String,
    pub content: String,
}

/// Bundles manifest outputs into the data directory.
pub struct Bundler<'a> {
    minifier: &'a dyn Minifier,
    data_dir: &'a Path,
}

impl<'a> Bundler<'a> {
    pub fn new(minifier: &'a dyn Minifier, data_dir: &'a Path) -> Self {
        Self { minifier, data_dir }
    }

    /// Bundle `output` and persist it; returns the artifact path.
    ///
    /// Loose outputs are returned as-is.
    pub fn run(&self, output: &ResolvedOutput) -> BuildResult<PathBuf> {
        let path = output.artifact(self.data_dir);
        if output.origin == Origin::Loose {
            debug!("bundle"; "{} is pre-built, skipping", output.name);
            return Ok(path);
        }

        let bundle = self.bundle(output)?;
        log!("bundle"; "generating {}", path.display());
        self.write(&bundle)
    }

    /// Read, minify and concatenate the inputs of `output`.
    pub fn bundle(&self, output: &ResolvedOutput) -> BuildResult<Bundle> {
        let mut content = String::new();
        for input in &output.inputs {
            let source = fs::read_to_string(input).map_err(|source| BuildError::SourceRead {
                output: output.name.clone(),
                path: input.clone(),
                source,
            })?;
            let minified = self.minify_input(input, &source).map_err(|source| {
                BuildError::Minify {
                    output: output.name.clone(),
                    path: input.clone(),
                    source,
                }
            })?;
            content.push_str(&minified);
        }

        Ok(Bundle {
            name: output.name.clone(),
            content,
        })
    }

    fn minify_input(&self, input: &Path, source: &str) -> Result<String, MinifyError> {
        let name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if is_preminified(name) {
            debug!("bundle"; "{} is pre-minified", name);
            return Ok(source.to_owned());
        }
        self.minifier.minify(ContentKind::from_path(input), source)
    }

    /// Atomically persist `bundle` as `<data_dir>/<name>`.
    pub fn write(&self, bundle: &Bundle) -> BuildResult<PathBuf> {
        let path = self.data_dir.join(&bundle.name);
        write_atomic(&path, bundle.content.as_bytes()).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
