//! Configuration section definitions.
//!
//! Each module corresponds to a section in `webembed.toml`:
//!
//! | Module   | TOML Section | Purpose                                  |
//! |----------|--------------|------------------------------------------|
//! | `paths`  | `[paths]`    | Source, data and generated directories   |
//! | `minify` | `[minify]`   | Minifier backend and remote endpoints    |
//! | `emit`   | `[emit]`     | Shape of the generated headers           |

mod emit;
mod minify;
mod paths;

pub use emit::EmitConfig;
pub use minify::{MinifyBackend, MinifyConfig};
pub use paths::PathsConfig;
