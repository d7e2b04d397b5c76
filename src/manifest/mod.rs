//! Bundle manifest: output name → ordered input files.
//!
//! ```json
//! {
//!   "app.css": ["normalize.css", "layout.css"],
//!   "app.js":  ["util.js", "main.js"]
//! }
//! ```
//!
//! Key order is significant and preserved. Outputs not declared here but
//! present in the data directory are picked up by [`resolve`].

mod resolve;

pub use resolve::{Origin, ResolvedOutput, resolve};

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Component, Path},
};

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::core::{BuildError, BuildResult};
use crate::debug;

/// Parsed manifest, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, Vec<String>)>,
}

impl Manifest {
    /// Load the manifest at `path`.
    ///
    /// A missing file is an empty manifest; anything unreadable or malformed
    /// is a [`BuildError::ManifestParse`].
    pub fn load(path: &Path) -> BuildResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("manifest"; "{} not found, no bundles declared", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(BuildError::ManifestParse {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        };

        Self::parse(&content).map_err(|err| BuildError::ManifestParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Parse manifest JSON.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, inputs)| (name.as_str(), inputs.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

/// Builds the ordered entry list, rejecting duplicate keys and empty lists
/// (a plain map type would silently keep the last duplicate).
struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping output names to lists of input files")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Manifest, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, Vec<String>)> =
            Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(name) = map.next_key::<String>()? {
            if let Err(reason) = check_output_name(&name) {
                return Err(de::Error::custom(format!("output `{name}` {reason}")));
            }
            if entries.iter().any(|(n, _)| *n == name) {
                return Err(de::Error::custom(format!("duplicate output `{name}`")));
            }
            let inputs: Vec<String> = map.next_value()?;
            if inputs.is_empty() {
                return Err(de::Error::custom(format!("output `{name}` has no inputs")));
            }
            entries.push((name, inputs));
        }

        Ok(Manifest { entries })
    }
}

/// Output names are joined onto the data and generated directories, so they
/// must stay inside them.
fn check_output_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("has an empty name");
    }
    if name.ends_with('/') {
        return Err("does not name a file");
    }
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => return Err("must not contain `.` segments"),
            Component::ParentDir => return Err("must not contain `..`"),
            Component::RootDir | Component::Prefix(_) => return Err("must be a relative path"),
        }
    }
    Ok(())
}
