//! Project configuration management for `webembed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths]
//! │   ├── minify     # [minify]
//! │   └── emit       # [emit]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # EmbedConfig (this file)
//! ```
//!
//! The config file is optional: without one, defaults apply with the
//! current directory as project root.

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, resolve_path};

pub use section::{EmitConfig, MinifyBackend, MinifyConfig, PathsConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing webembed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Directory layout
    pub paths: PathsConfig,

    /// Minifier selection
    pub minify: MinifyConfig,

    /// Generated header layout
    pub emit: EmitConfig,
}

impl EmbedConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. CLI path overrides are
    /// relative to cwd, config paths relative to the project root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "'{}' not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli, &cwd);
        let root = config.root.clone();
        config.paths.normalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("in {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply CLI overrides. Paths are resolved against `cwd` here so that
    /// `normalize` keeps them as-is.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        let overrides = [
            (&mut self.paths.source, &cli.source),
            (&mut self.paths.data, &cli.data),
            (&mut self.paths.generated, &cli.generated),
            (&mut self.paths.manifest, &cli.manifest),
        ];
        for (target, value) in overrides {
            if let Some(path) = value {
                *target = resolve_path(path, cwd);
            }
        }

        if let Some(enable) = cli.minify_override() {
            self.minify.enable = enable;
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the normalized configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.paths.validate(&mut diag);
        self.minify.validate(&mut diag);
        self.emit.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> EmbedConfig {
    let (parsed, ignored) = EmbedConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result = EmbedConfig::parse_with_ignored("[paths\nsource = \"web\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_default_config() {
        let config = EmbedConfig::default();
        assert!(config.config_path.is_none());
        assert_eq!(config.root, PathBuf::new());
        assert!(config.minify.enable);
        assert_eq!(config.emit.header_prefix, "web_server.");
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[paths]\nsource = \"web\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = EmbedConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.paths.source, PathBuf::from("web"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[minify]\nbackend = \"local\"\n[emit]\nstorage = \"\"";
        let (_, ignored) = EmbedConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = test_parse_config(
            "[minify]\nbackend = \"remote\"\ntimeout = 0\n[emit]\nbytes_per_line = 0",
        );
        config.paths.normalize(Path::new("/fw"));
        let err = config.validate().unwrap_err();
        let diag = match err.downcast::<ConfigError>().unwrap() {
            ConfigError::Diagnostics(diag) => diag,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(diag.errors().len(), 2);
    }
}
