use crate::{
    error::{Error, Result},
    header::DocumentHeader,
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Sentinel path segment for a manifest without a namespace.
pub const NO_NAMESPACE: &str = "no-namespace";

/// Sentinel path segment for a manifest without an apiVersion.
pub const NO_VERSION: &str = "no-version";

/// Sentinel path segment for a manifest without a kind.
pub const NO_KIND: &str = "no-kind";

/// Extension given to every placed file.
const FILE_EXT: &str = ".yml";

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Derives target paths from manifest headers and writes documents there.
///
/// Placement is idempotent with respect to directories: re-running with the
/// same inputs re-creates nothing and overwrites the file in place
/// (last write wins).
#[derive(Debug)]
pub struct Placer {
    root: PathBuf,
}

impl Placer {
    /// Creates a placer rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory files are placed under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Derives the target path for a header:
    /// `<root>/<namespace>/<apiVersion>/<kind>/<name>.yml`, with sentinel
    /// segments substituted for empty fields. `name` has no sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadata`] when the metadata block is absent.
    pub fn target_path(&self, header: &DocumentHeader) -> Result<PathBuf> {
        let Some(metadata) = &header.metadata else {
            return Err(Error::missing_metadata(&header.kind));
        };

        let namespace = or_sentinel(&metadata.namespace, NO_NAMESPACE);
        let api_version = or_sentinel(&header.api_version, NO_VERSION);
        let kind = or_sentinel(&header.kind, NO_KIND);

        Ok(self
            .root
            .join(namespace)
            .join(api_version)
            .join(kind)
            .join(format!("{}{FILE_EXT}", metadata.name)))
    }

    /// Writes one document to its derived path, creating intermediate
    /// directories as needed and overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The metadata block is absent (caller precondition violation)
    /// - The directory chain cannot be created
    /// - The file cannot be written
    pub fn place(&self, header: &DocumentHeader, doc: &str) -> Result<PathBuf> {
        let path = self.target_path(header)?;

        // target_path always appends a filename component
        let dir = path.parent().expect("derived path has a parent");
        create_dir_chain(dir)?;

        write_document(&path, doc)?;

        debug!("Placed {} document at {}", header.kind, path.display());

        Ok(path)
    }
}

fn or_sentinel<'a>(value: &'a str, sentinel: &'a str) -> &'a str {
    if value.is_empty() { sentinel } else { value }
}

/// Recursive, idempotent directory creation; 0700 on unix.
fn create_dir_chain(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|e| Error::io(dir, e))
}

/// Create-or-truncate write of the exact document bytes; 0644 on new files.
fn write_document(path: &Path, doc: &str) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| Error::io(path, e))?;
    file.write_all(doc.as_bytes())
        .map_err(|e| Error::io(path, e))?;

    Ok(())
}
