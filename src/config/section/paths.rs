//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "src/html"          # Manifest inputs (relative to project root)
//! data = "src/data"            # Bundles + pre-built loose files
//! generated = "src"            # Generated headers
//! manifest = "manifest.json"   # Relative to `source`
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::util::resolve_path;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory the manifest's input names are relative to.
    pub source: PathBuf,

    /// Directory receiving bundles; loose files here are embedded as-is.
    pub data: PathBuf,

    /// Directory receiving the generated headers.
    pub generated: PathBuf,

    /// Manifest file, relative to `source` unless absolute.
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: "src/html".into(),
            data: "src/data".into(),
            generated: "src".into(),
            manifest: "manifest.json".into(),
        }
    }
}

impl PathsConfig {
    pub const SOURCE: FieldPath = FieldPath::new("paths.source");
    pub const DATA: FieldPath = FieldPath::new("paths.data");
    pub const GENERATED: FieldPath = FieldPath::new("paths.generated");

    /// Make every path absolute. The manifest resolves against `source`.
    pub fn normalize(&mut self, root: &Path) {
        self.source = resolve_path(&self.source, root);
        self.data = resolve_path(&self.data, root);
        self.generated = resolve_path(&self.generated, root);
        self.manifest = resolve_path(&self.manifest, &self.source);
    }

    /// Check normalized paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.data == self.generated {
            diag.error_with_hint(
                Self::GENERATED,
                "must differ from `paths.data`",
                "headers written into the data directory would be embedded as loose files",
            );
        }
        if self.data.exists() && !self.data.is_dir() {
            diag.error(
                Self::DATA,
                format!("'{}' is not a directory", self.data.display()),
            );
        }
        if !self.source.is_dir() {
            diag.warn(
                Self::SOURCE,
                format!("directory '{}' not found", self.source.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    #[test]
    fn test_paths_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.source, PathBuf::from("src/html"));
        assert_eq!(config.paths.data, PathBuf::from("src/data"));
        assert_eq!(config.paths.generated, PathBuf::from("src"));
        assert_eq!(config.paths.manifest, PathBuf::from("manifest.json"));
    }

    #[test]
    fn test_paths_normalize() {
        let mut config =
            test_parse_config("[paths]\nsource = \"web\"\nmanifest = \"/etc/bundles.json\"");
        config.paths.normalize(Path::new("/fw"));

        assert_eq!(config.paths.source, PathBuf::from("/fw/web"));
        assert_eq!(config.paths.data, PathBuf::from("/fw/src/data"));
        assert_eq!(config.paths.manifest, PathBuf::from("/etc/bundles.json"));
    }

    #[test]
    fn test_manifest_relative_to_source() {
        let mut paths = PathsConfig::default();
        paths.normalize(Path::new("/fw"));
        assert_eq!(paths.manifest, PathBuf::from("/fw/src/html/manifest.json"));
    }

    #[test]
    fn test_data_and_generated_must_differ() {
        let mut paths = PathsConfig {
            generated: "src/data".into(),
            ..PathsConfig::default()
        };
        paths.normalize(Path::new("/fw"));

        let mut diag = ConfigDiagnostics::new();
        paths.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field, PathsConfig::GENERATED);
    }

    #[test]
    fn test_data_must_be_a_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("data"), b"").unwrap();
        let mut paths = PathsConfig {
            source: ".".into(),
            data: "data".into(),
            generated: "gen".into(),
            ..PathsConfig::default()
        };
        paths.normalize(dir.path());

        let mut diag = ConfigDiagnostics::new();
        paths.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, PathsConfig::DATA);
    }
}
