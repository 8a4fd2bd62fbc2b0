//! # yamlsplit
//!
//! Splits a multi-document YAML stream into one file per manifest,
//! organized by the manifest's identifying header fields.
//!
//! ## Quick Start
//!
//! ```no_run
//! use yamlsplit::{run, Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .target_dir("./manifests")
//!     .build()?;
//!
//! let report = run("kind: Pod\nmetadata:\n  name: web\n", &config)?;
//! println!("{}", report.root_dir.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is a single linear pipeline:
//! 1. **Splitter**: cuts the stream at `---` document boundaries
//! 2. **HeaderExtractor**: reads `apiVersion`, `kind` and `metadata` from
//!    each document without requiring a complete manifest
//! 3. **Placer**: writes each qualifying document to
//!    `<root>/<namespace>/<apiVersion>/<kind>/<name>.yml`, substituting
//!    sentinel segments for absent fields
//!
//! Documents without a `kind` are skipped silently; documents with a `kind`
//! but no `metadata` block are skipped with a diagnostic. The run aborts on
//! the first parse or write failure, keeping whatever was already written.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod header;
mod pipeline;
mod placer;
mod splitter;

pub use config::{Config, ConfigBuilder, DuplicatePolicy};
pub use error::{Error, Result};
pub use header::{extract_header, DocumentHeader, Metadata, SkipReason};
pub use pipeline::{run, DocumentOutcome, Pipeline, RunReport};
pub use placer::{Placer, NO_KIND, NO_NAMESPACE, NO_VERSION};
pub use splitter::split_documents;
