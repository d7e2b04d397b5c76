//! Minifier collaborators.
//!
//! A [`Minifier`] maps `(kind, text)` to minified text. Backends:
//!
//! | Backend   | JS             | CSS            | HTML     |
//! |-----------|----------------|----------------|----------|
//! | `local`   | oxc            | lightningcss   | built-in |
//! | `remote`  | HTTP service   | HTTP service   | built-in |
//! | `none`    | passthrough    | passthrough    | passthrough |

mod html;
mod local;
mod remote;

pub use local::LocalMinifier;
pub use remote::RemoteMinifier;

use thiserror::Error;

use crate::config::{MinifyBackend, MinifyConfig};
use crate::core::ContentKind;

/// Minification failures.
#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("JavaScript parse error: {0}")]
    JsParse(String),

    #[error("CSS error: {0}")]
    Css(String),

    #[error("unterminated HTML comment at byte {0}")]
    UnterminatedComment(usize),

    #[error("request to `{url}` failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` returned an empty body")]
    EmptyResponse { url: String },

    #[error("`{url}` returned an error: {payload}")]
    ErrorPayload { url: String, payload: String },
}

/// Pure text transformation for one content kind.
///
/// Kinds a minifier does not handle are returned unchanged.
pub trait Minifier: Send + Sync {
    fn minify(&self, kind: ContentKind, source: &str) -> Result<String, MinifyError>;
}

/// Leaves every input untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Minifier for Passthrough {
    fn minify(&self, _kind: ContentKind, source: &str) -> Result<String, MinifyError> {
        Ok(source.to_owned())
    }
}

/// Build the minifier selected by configuration.
pub fn from_config(config: &MinifyConfig) -> Result<Box<dyn Minifier>, MinifyError> {
    if !config.enable {
        return Ok(Box::new(Passthrough));
    }
    Ok(match config.backend {
        MinifyBackend::Local => Box::new(LocalMinifier),
        MinifyBackend::Remote => Box::new(RemoteMinifier::new(config)?),
        MinifyBackend::None => Box::new(Passthrough),
    })
}

/// Inputs that were shipped pre-minified (`*.min.js`, `*.min.css`).
pub fn is_preminified(name: &str) -> bool {
    name.ends_with(".min.js") || name.ends_with(".min.css")
}
