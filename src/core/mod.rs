//! Core types - pure abstractions shared across the codebase.

mod error;
mod kind;

pub use error::{BuildError, BuildResult};
pub use kind::ContentKind;
