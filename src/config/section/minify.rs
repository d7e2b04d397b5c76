//! `[minify]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [minify]
//! enable = true
//! backend = "local"            # local | remote | none
//! timeout = 30                 # Request timeout in seconds (remote)
//! js_url = "https://closure-compiler.appspot.com/compile"
//! css_url = "https://cssminifier.com/raw"
//! js_compilation_level = "SIMPLE_OPTIMIZATIONS"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::util::is_http_url;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Which minifier implementation handles JS and CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyBackend {
    /// oxc + lightningcss, in process
    #[default]
    Local,
    /// HTTP minification services
    Remote,
    /// No minification
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    pub enable: bool,
    pub backend: MinifyBackend,
    /// Seconds before a remote request is abandoned.
    pub timeout: u64,
    pub js_url: String,
    pub css_url: String,
    pub js_compilation_level: String,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            enable: true,
            backend: MinifyBackend::Local,
            timeout: 30,
            js_url: "https://closure-compiler.appspot.com/compile".into(),
            css_url: "https://cssminifier.com/raw".into(),
            js_compilation_level: "SIMPLE_OPTIMIZATIONS".into(),
        }
    }
}

const COMPILATION_LEVELS: [&str; 3] = [
    "WHITESPACE_ONLY",
    "SIMPLE_OPTIMIZATIONS",
    "ADVANCED_OPTIMIZATIONS",
];

impl MinifyConfig {
    pub const TIMEOUT: FieldPath = FieldPath::new("minify.timeout");
    pub const JS_URL: FieldPath = FieldPath::new("minify.js_url");
    pub const CSS_URL: FieldPath = FieldPath::new("minify.css_url");
    pub const JS_COMPILATION_LEVEL: FieldPath = FieldPath::new("minify.js_compilation_level");

    /// Remote settings are only checked when the remote backend is active.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable || self.backend != MinifyBackend::Remote {
            return;
        }
        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "must be greater than 0");
        }
        for (field, url) in [(Self::JS_URL, &self.js_url), (Self::CSS_URL, &self.css_url)] {
            if !is_http_url(url) {
                diag.error(field, format!("'{url}' is not an http(s) URL"));
            }
        }
        if !COMPILATION_LEVELS.contains(&self.js_compilation_level.as_str()) {
            diag.error_with_hint(
                Self::JS_COMPILATION_LEVEL,
                format!("unknown level '{}'", self.js_compilation_level),
                COMPILATION_LEVELS.join(" | "),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_minify_defaults() {
        let config = test_parse_config("");
        assert!(config.minify.enable);
        assert_eq!(config.minify.backend, MinifyBackend::Local);
        assert_eq!(config.minify.timeout, 30);
    }

    #[test]
    fn test_minify_backend_parse() {
        let config = test_parse_config("[minify]\nbackend = \"remote\"\ntimeout = 5");
        assert_eq!(config.minify.backend, MinifyBackend::Remote);
        assert_eq!(config.minify.timeout, 5);

        let config = test_parse_config("[minify]\nbackend = \"none\"");
        assert_eq!(config.minify.backend, MinifyBackend::None);
    }

    #[test]
    fn test_minify_backend_invalid() {
        let result: Result<MinifyConfig, _> = toml::from_str("backend = \"uglify\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_remote_validation() {
        let config = MinifyConfig {
            backend: MinifyBackend::Remote,
            timeout: 0,
            js_url: "closure".into(),
            js_compilation_level: "FAST".into(),
            ..MinifyConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                MinifyConfig::TIMEOUT,
                MinifyConfig::JS_URL,
                MinifyConfig::JS_COMPILATION_LEVEL
            ]
        );
    }

    #[test]
    fn test_local_skips_remote_validation() {
        let config = MinifyConfig {
            timeout: 0,
            js_url: String::new(),
            ..MinifyConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
