//! Error types shared by catalog loading, persistence, and lookups.

use core::fmt;

/// Which JSON document a load failure refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentKind {
    Index,
    Config,
    Card,
}

impl DocumentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Config => "config",
            Self::Card => "card",
        }
    }
}

#[derive(Debug)]
pub enum LoadErrorKind {
    /// The store could not produce the document bytes.
    Unreadable,
    /// The bytes are not valid JSON for the expected shape.
    Malformed(serde_json::Error),
    /// The JSON parsed but violates a content rule.
    Invalid(&'static str),
}

/// A document could not be loaded. State is left untouched by callers.
#[derive(Debug)]
pub struct LoadError {
    pub document: DocumentKind,
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub const fn unreadable(document: DocumentKind) -> Self {
        Self {
            document,
            kind: LoadErrorKind::Unreadable,
        }
    }

    pub const fn malformed(document: DocumentKind, err: serde_json::Error) -> Self {
        Self {
            document,
            kind: LoadErrorKind::Malformed(err),
        }
    }

    pub const fn invalid(document: DocumentKind, reason: &'static str) -> Self {
        Self {
            document,
            kind: LoadErrorKind::Invalid(reason),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LoadErrorKind::Unreadable => write!(f, "{} document unreadable", self.document.as_str()),
            LoadErrorKind::Malformed(err) => {
                write!(f, "{} document malformed: {}", self.document.as_str(), err)
            }
            LoadErrorKind::Invalid(reason) => {
                write!(f, "{} document invalid: {}", self.document.as_str(), reason)
            }
        }
    }
}

impl core::error::Error for LoadError {}

/// Writing the updated default language failed.
#[derive(Debug)]
pub enum PersistError {
    /// Current config could not be read back before rewriting.
    Read,
    /// Current config is not a JSON object with a `languages` object.
    Malformed,
    /// The requested key is not listed under `languages.supported`.
    UnknownLanguage,
    /// Re-encoding the document failed.
    Encode(serde_json::Error),
    /// The store rejected the write.
    Write,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("config could not be read"),
            Self::Malformed => f.write_str("config has no languages object"),
            Self::UnknownLanguage => f.write_str("language is not supported"),
            Self::Encode(err) => write!(f, "config encode failed: {err}"),
            Self::Write => f.write_str("config write failed"),
        }
    }
}

impl core::error::Error for PersistError {}

/// A global card index outside `[0, total)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RangeError {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card index {} outside 0..{}", self.index, self.total)
    }
}

impl core::error::Error for RangeError {}
