use crate::error::{Error, Result};
use serde::Deserialize;

/// The nested `metadata` block of a manifest header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    /// The manifest's `metadata.name` field.
    #[serde(default)]
    pub name: String,

    /// The manifest's `metadata.namespace` field.
    #[serde(default)]
    pub namespace: String,
}

/// The identifying head of one manifest document.
///
/// Only the four fields relevant for placement are extracted; unknown
/// fields at any level are ignored, and every extracted field is optional.
/// The document does not have to be a complete or valid manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentHeader {
    /// The manifest's `apiVersion` field.
    #[serde(default, rename = "apiVersion")]
    pub api_version: String,

    /// The manifest's `kind` field.
    #[serde(default)]
    pub kind: String,

    /// The manifest's `metadata` block; `None` when the block is absent.
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// Why a document was skipped rather than placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `kind` is empty; the document is not a manifest. Skipped silently.
    NoKind,
    /// `kind` is present but the `metadata` block is absent. Skipped with
    /// a diagnostic line.
    NoMetadata,
}

impl DocumentHeader {
    /// Returns the skip reason for this header, or `None` if the document
    /// qualifies for placement.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        if self.kind.is_empty() {
            Some(SkipReason::NoKind)
        } else if self.metadata.is_none() {
            Some(SkipReason::NoMetadata)
        } else {
            None
        }
    }
}

/// Extracts the placement-relevant header fields from one document.
///
/// A document that parses to YAML `null` (an empty or comment-only segment)
/// yields an all-empty header rather than an error; the empty `kind` then
/// routes it to the silent-skip path.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the document is not well-formed YAML or is
/// a well-formed scalar/sequence that cannot carry header fields. This is
/// fatal for the whole run.
pub fn extract_header(doc: &str) -> Result<DocumentHeader> {
    serde_yaml_ng::from_str::<Option<DocumentHeader>>(doc)
        .map(Option::unwrap_or_default)
        .map_err(|e| Error::parse(doc, e))
}
