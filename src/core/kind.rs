//! Content classification by file name suffix.

use std::fmt;
use std::path::Path;

/// Semantic kind of an embedded file.
///
/// Drives minifier dispatch, the emitted array representation and the
/// content-type tag of the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Fallback for every unrecognized suffix
    Text,
    Css,
    Js,
    Html,
    Jpeg,
    Png,
}

/// Suffix rules, matched case-sensitively in order.
///
/// Extending the classifier means adding a row here and a tag below.
const SUFFIX_RULES: &[(&str, ContentKind)] = &[
    (".css", ContentKind::Css),
    (".js", ContentKind::Js),
    (".htm", ContentKind::Html),
    (".html", ContentKind::Html),
    (".jpg", ContentKind::Jpeg),
    (".png", ContentKind::Png),
];

impl ContentKind {
    /// Classify a file name (or any string ending in one).
    pub fn from_name(name: &str) -> Self {
        SUFFIX_RULES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map_or(Self::Text, |(_, kind)| *kind)
    }

    /// Classify a path by its file name.
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .map_or(Self::Text, Self::from_name)
    }

    /// Content-type tag understood by the serving firmware.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Css => "CSS",
            Self::Js => "JS",
            Self::Html => "HTML",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    /// HTTP MIME type for this kind.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Css => "text/css; charset=utf-8",
            Self::Js => "text/javascript; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Whether artifacts of this kind are embedded as string literals.
    ///
    /// `Text` is the fallback for unknown suffixes and may hold arbitrary
    /// bytes, so it is embedded as a byte array like the image kinds.
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Css | Self::Js | Self::Html)
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Css => "css",
            Self::Js => "js",
            Self::Html => "html",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
