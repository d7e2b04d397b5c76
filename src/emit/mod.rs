//! Artifact → C array declaration.
//!
//! Every header declares the content array and its length:
//!
//! ```c
//! static const char CONTENT_APP_CSS[] PROGMEM =
//!   "a{color:red}\n"
//!   "b{margin:0}";
//! static const size_t CONTENT_APP_CSS_LENGTH = 24;
//! ```
//!
//! Textual kinds become string literals, everything else a byte array with
//! an explicit `0x00` sentinel. Either way the array holds the artifact plus
//! exactly one trailing NUL, and the `_LENGTH` constant is the artifact size.

mod binary;
mod symbol;
mod text;

pub use symbol::{length_symbol, symbol_name};

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::EmitConfig;
use crate::core::{BuildError, BuildResult, ContentKind};
use crate::utils::fs::write_if_changed;
use crate::{debug, log};

/// Array initializer of an emitted symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    /// String literals, one per artifact line
    Text(Vec<String>),
    /// Raw bytes, rendered as hex literals
    Binary(Vec<u8>),
}

/// One artifact ready to be rendered as a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedSymbol {
    pub symbol: String,
    /// Artifact size in bytes, excluding the trailing NUL
    pub length: usize,
    pub kind: ContentKind,
    pub representation: Representation,
    pub source: PathBuf,
}

/// Read the artifact of output `name` at `path` and prepare its declaration.
///
/// The symbol comes from `name`, never from `path`, so headers agree with
/// the collision check and the routing table.
pub fn emit(name: &str, path: &Path, kind: ContentKind) -> BuildResult<EmittedSymbol> {
    let read_err = |source| BuildError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    };

    let (length, representation) = if kind.is_textual() {
        let content = fs::read_to_string(path).map_err(read_err)?;
        (content.len(), Representation::Text(text::encode(&content)))
    } else {
        let bytes = fs::read(path).map_err(read_err)?;
        (bytes.len(), Representation::Binary(bytes))
    };

    Ok(EmittedSymbol {
        symbol: symbol_name(name),
        length,
        kind,
        representation,
        source: path.to_path_buf(),
    })
}

impl EmittedSymbol {
    /// Header text declaring the array and its length.
    pub fn render(&self, config: &EmitConfig) -> String {
        let source = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        let mut out = String::with_capacity(128 + 6 * self.length);
        out.push_str("// Generated by webembed from ");
        out.push_str(&source);
        out.push_str(". Do not edit.\n");

        out.push_str("static const char ");
        out.push_str(&self.symbol);
        out.push_str("[]");
        if !config.storage.is_empty() {
            out.push(' ');
            out.push_str(&config.storage);
        }

        match &self.representation {
            Representation::Text(literals) => {
                out.push_str(" =\n");
                let last = literals.len().saturating_sub(1);
                for (i, literal) in literals.iter().enumerate() {
                    out.push_str("  ");
                    out.push_str(literal);
                    if i == last {
                        out.push(';');
                    }
                    out.push('\n');
                }
            }
            Representation::Binary(bytes) => {
                out.push_str(" = {\n");
                out.push_str(&binary::encode(bytes, config.bytes_per_line));
                out.push_str("};\n");
            }
        }

        out.push_str("static const size_t ");
        out.push_str(&length_symbol(&self.symbol));
        out.push_str(" = ");
        out.push_str(&self.length.to_string());
        out.push_str(";\n");
        out
    }
}

/// Emit the header of `artifact` into `generated_dir`.
///
/// The header is only rewritten when its content changes.
pub fn write_header(
    name: &str,
    artifact: &Path,
    kind: ContentKind,
    generated_dir: &Path,
    config: &EmitConfig,
) -> BuildResult<PathBuf> {
    let header = generated_dir.join(config.header_name(name));
    let rendered = emit(name, artifact, kind)?.render(config);

    let written = write_if_changed(&header, rendered.as_bytes()).map_err(|source| {
        BuildError::Write {
            path: header.clone(),
            source,
        }
    })?;
    if written {
        log!("embed"; "generating {}", header.display());
    } else {
        debug!("embed"; "{} unchanged", header.display());
    }
    Ok(header)
}
