//! `[emit]` section configuration.
//!
//! Controls the shape of the generated C/C++ headers.
//!
//! # Example
//!
//! ```toml
//! [emit]
//! header_prefix = "web_server."           # web_server.<name>.h
//! table_file = "web_server_static_files.h"
//! table_type = "StaticFile"               # row struct of the routing table
//! table_name = "staticFiles"
//! storage = "PROGMEM"                     # empty string: no attribute
//! bytes_per_line = 16                     # hex literals per line
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub header_prefix: String,
    pub table_file: String,
    pub table_type: String,
    pub table_name: String,
    /// Attribute placing arrays in flash.
    pub storage: String,
    pub bytes_per_line: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            header_prefix: "web_server.".into(),
            table_file: "web_server_static_files.h".into(),
            table_type: "StaticFile".into(),
            table_name: "staticFiles".into(),
            storage: "PROGMEM".into(),
            bytes_per_line: 16,
        }
    }
}

impl EmitConfig {
    pub const TABLE_FILE: FieldPath = FieldPath::new("emit.table_file");
    pub const TABLE_TYPE: FieldPath = FieldPath::new("emit.table_type");
    pub const TABLE_NAME: FieldPath = FieldPath::new("emit.table_name");
    pub const STORAGE: FieldPath = FieldPath::new("emit.storage");
    pub const BYTES_PER_LINE: FieldPath = FieldPath::new("emit.bytes_per_line");

    /// File name of the header for one output.
    pub fn header_name(&self, output: &str) -> String {
        format!("{}{}.h", self.header_prefix, output)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.bytes_per_line == 0 {
            diag.error(Self::BYTES_PER_LINE, "must be greater than 0");
        }
        if self.table_file.is_empty() || self.table_file.contains(['/', '\\']) {
            diag.error(Self::TABLE_FILE, "must be a plain file name");
        }
        for (field, value) in [
            (Self::TABLE_TYPE, &self.table_type),
            (Self::TABLE_NAME, &self.table_name),
        ] {
            if !is_c_identifier(value) {
                diag.error(field, format!("'{value}' is not a C identifier"));
            }
        }
        if !self.storage.is_empty() && !is_c_identifier(&self.storage) {
            diag.error_with_hint(
                Self::STORAGE,
                format!("'{}' is not a C identifier", self.storage),
                "use an empty string to omit the attribute",
            );
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
