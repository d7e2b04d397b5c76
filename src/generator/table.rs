//! Static routing table generation.
//!
//! Maps URL paths to the embedded arrays of every resolved output.
//!
//! # Table Format
//!
//! ```c
//! #include "web_server.app.css.h"
//! #include "web_server.logo.png.h"
//! StaticFile staticFiles[] = {
//!   { "/app.css", CONTENT_APP_CSS, CONTENT_APP_CSS_LENGTH, _CONTENT_TYPE_CSS },
//!   { "/logo.png", CONTENT_LOGO_PNG, CONTENT_LOGO_PNG_LENGTH, _CONTENT_TYPE_PNG },
//! };
//! ```

use std::path::{Path, PathBuf};

use crate::config::EmitConfig;
use crate::core::{BuildError, BuildResult, ContentKind};
use crate::emit::length_symbol;
use crate::manifest::ResolvedOutput;
use crate::utils::fs::write_if_changed;
use crate::{debug, log};

/// One row of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTableEntry {
    pub url: String,
    pub symbol: String,
    pub header: String,
    pub kind: ContentKind,
}

impl StaticTableEntry {
    fn new(output: &ResolvedOutput, config: &EmitConfig) -> Self {
        Self {
            url: output.url(),
            symbol: output.symbol(),
            header: config.header_name(&output.name),
            kind: output.kind,
        }
    }
}

struct StaticTable<'a> {
    entries: Vec<StaticTableEntry>,
    config: &'a EmitConfig,
}

impl<'a> StaticTable<'a> {
    fn build(outputs: &[ResolvedOutput], config: &'a EmitConfig) -> Self {
        let entries = outputs
            .iter()
            .map(|output| StaticTableEntry::new(output, config))
            .collect();
        Self { entries, config }
    }

    fn into_source(self) -> String {
        let mut src = String::with_capacity(128 * (self.entries.len() + 1));

        for entry in &self.entries {
            src.push_str("#include \"");
            src.push_str(&entry.header);
            src.push_str("\"\n");
        }

        src.push_str(&self.config.table_type);
        src.push(' ');
        src.push_str(&self.config.table_name);
        src.push_str("[] = {\n");

        for entry in &self.entries {
            src.push_str("  { \"");
            src.push_str(&escape_c(&entry.url));
            src.push_str("\", ");
            src.push_str(&entry.symbol);
            src.push_str(", ");
            src.push_str(&length_symbol(&entry.symbol));
            src.push_str(", _CONTENT_TYPE_");
            src.push_str(entry.kind.tag());
            src.push_str(" },\n");
        }

        // C has no zero-length arrays; an empty path never matches a request
        if self.entries.is_empty() {
            src.push_str("  { \"\", \"\", 0, _CONTENT_TYPE_TEXT },\n");
        }

        src.push_str("};\n");
        src
    }
}

/// Render the routing table for `outputs`, in their order.
pub fn generate_table(outputs: &[ResolvedOutput], config: &EmitConfig) -> String {
    StaticTable::build(outputs, config).into_source()
}

/// Write the routing table into `generated_dir` if its content changed.
pub fn write_table(
    outputs: &[ResolvedOutput],
    generated_dir: &Path,
    config: &EmitConfig,
) -> BuildResult<PathBuf> {
    let path = generated_dir.join(&config.table_file);
    let source = generate_table(outputs, config);

    let written = write_if_changed(&path, source.as_bytes()).map_err(|source| BuildError::Write {
        path: path.clone(),
        source,
    })?;
    if written {
        log!("table"; "generating {}", path.display());
    } else {
        debug!("table"; "{} unchanged", path.display());
    }
    Ok(path)
}

/// Escape a value for a C string literal.
fn escape_c(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Origin;
    use std::fs;
    use tempfile::TempDir;

    fn output(name: &str, origin: Origin) -> ResolvedOutput {
        ResolvedOutput {
            name: name.into(),
            inputs: vec![PathBuf::from(name)],
            kind: ContentKind::from_name(name),
            origin,
        }
    }

    #[test]
    fn test_generate_table() {
        let outputs = [
            output("app.css", Origin::Manifest),
            output("logo.png", Origin::Loose),
        ];
        let table = generate_table(&outputs, &EmitConfig::default());

        assert_eq!(
            table,
            "#include \"web_server.app.css.h\"\n\
             #include \"web_server.logo.png.h\"\n\
             StaticFile staticFiles[] = {\n  \
             { \"/app.css\", CONTENT_APP_CSS, CONTENT_APP_CSS_LENGTH, _CONTENT_TYPE_CSS },\n  \
             { \"/logo.png\", CONTENT_LOGO_PNG, CONTENT_LOGO_PNG_LENGTH, _CONTENT_TYPE_PNG },\n\
             };\n"
        );
    }

    #[test]
    fn test_empty_table() {
        let table = generate_table(&[], &EmitConfig::default());
        assert_eq!(
            table,
            "StaticFile staticFiles[] = {\n  { \"\", \"\", 0, _CONTENT_TYPE_TEXT },\n};\n"
        );
    }

    #[test]
    fn test_custom_table_names() {
        let config = EmitConfig {
            header_prefix: "assets_".into(),
            table_type: "Asset".into(),
            table_name: "assets".into(),
            ..EmitConfig::default()
        };
        let table = generate_table(&[output("README", Origin::Loose)], &config);
        assert!(table.starts_with("#include \"assets_README.h\"\nAsset assets[] = {\n"));
        assert!(table.contains("_CONTENT_TYPE_TEXT"));
    }

    #[test]
    fn test_escape_url() {
        assert_eq!(escape_c("a\"b\\c"), "a\\\"b\\\\c");
    }

    #[test]
    fn test_write_table() {
        let dir = TempDir::new().unwrap();
        let outputs = [output("index.html", Origin::Manifest)];
        let config = EmitConfig::default();

        let path = write_table(&outputs, dir.path(), &config).unwrap();
        assert_eq!(path, dir.path().join("web_server_static_files.h"));
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("{ \"/index.html\", CONTENT_INDEX_HTML, CONTENT_INDEX_HTML_LENGTH, _CONTENT_TYPE_HTML },"));
    }
}
