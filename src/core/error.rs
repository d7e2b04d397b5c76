//! Build error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::minify::MinifyError;

/// Fatal pipeline errors.
///
/// Every variant names the output and/or path that caused it so the host
/// build system can point the user at the offending file.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed manifest `{}`: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("cannot read input `{}` of output `{output}`", path.display())]
    SourceRead {
        output: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot minify `{}` for output `{output}`", path.display())]
    Minify {
        output: String,
        path: PathBuf,
        #[source]
        source: MinifyError,
    },

    #[error("outputs `{first}` and `{second}` both map to symbol `{symbol}`")]
    SymbolCollision {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("cannot read artifact `{}`", path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot list data directory `{}`", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{0}` is not a resolved output")]
    UnknownOutput(String),
}

pub type BuildResult<T> = Result<T, BuildError>;
