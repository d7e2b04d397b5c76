//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Check that a string is an absolute `http`/`https` URL
///
/// Uses `url` crate for proper parsing, so ports, auth info and query
/// strings are all accepted
///
/// # Examples
/// ```ignore
/// is_http_url("https://cssminifier.com/raw")        -> true
/// is_http_url("http://localhost:8080/compile")      -> true
/// is_http_url("ftp://example.com/")                 -> false
/// is_http_url("closure-compiler.appspot.com")       -> false
/// ```
pub fn is_http_url(url_str: &str) -> bool {
    url::Url::parse(url_str)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/firmware/src/html/  ← start
/// /home/user/firmware/webembed.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Resolve a configured path against the project root.
///
/// Expands a leading `~`, keeps absolute paths as-is and joins relative
/// ones onto `root`.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}

// ============================================================================
// tests
// ============================================================================
