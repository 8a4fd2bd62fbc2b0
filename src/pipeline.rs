use crate::{
    config::{Config, DuplicatePolicy},
    error::{Error, Result},
    header::{extract_header, SkipReason},
    placer::Placer,
    splitter::split_documents,
};
use std::{collections::HashSet, path::PathBuf};
use tracing::{debug, info, instrument, warn};

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The document was written to the given path.
    Placed(PathBuf),
    /// The document was skipped; the run continued.
    Skipped(SkipReason),
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The root directory files were placed under. This is the run's
    /// primary output: print it alone on stdout.
    pub root_dir: PathBuf,

    /// Per-document outcomes, in split order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl RunReport {
    /// Total number of documents seen.
    #[must_use]
    pub fn documents(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of documents written to disk.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Placed(_)))
            .count()
    }

    /// Number of documents skipped for the given reason.
    #[must_use]
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == DocumentOutcome::Skipped(reason))
            .count()
    }
}

/// Orchestrates the split → extract → place run.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Processes one input stream end to end.
    ///
    /// Documents are handled strictly one at a time in split order. The
    /// per-document diagnostic lines go to stderr; stdout is reserved for
    /// the caller to print the root directory from the returned report.
    ///
    /// # Errors
    ///
    /// Aborts on the first fatal condition: a YAML parse failure, a
    /// directory or file write failure, or a duplicate derived path under
    /// [`DuplicatePolicy::Fail`]. Files written before the failure remain
    /// on disk.
    #[instrument(skip(self, input), fields(bytes = input.len()))]
    pub fn run(&self, input: &str) -> Result<RunReport> {
        let root_dir = self.resolve_root()?;
        let placer = Placer::new(&root_dir);

        let documents = split_documents(input);
        info!(
            "Processing {} documents into {}",
            documents.len(),
            root_dir.display()
        );

        let mut outcomes = Vec::with_capacity(documents.len());
        let mut seen_paths: HashSet<PathBuf> = HashSet::new();

        for doc in &documents {
            outcomes.push(self.process_document(&placer, doc, &mut seen_paths)?);
        }

        let report = RunReport { root_dir, outcomes };
        info!(
            "Placed {} of {} documents ({} without kind, {} without metadata)",
            report.placed(),
            report.documents(),
            report.skipped(SkipReason::NoKind),
            report.skipped(SkipReason::NoMetadata),
        );

        Ok(report)
    }

    /// Handles one document: extract, classify, place.
    fn process_document(
        &self,
        placer: &Placer,
        doc: &str,
        seen_paths: &mut HashSet<PathBuf>,
    ) -> Result<DocumentOutcome> {
        let header = extract_header(doc)?;

        match header.skip_reason() {
            Some(SkipReason::NoKind) => {
                // Not a manifest at all; skipped without a diagnostic.
                debug!("Skipping document without kind");
                Ok(DocumentOutcome::Skipped(SkipReason::NoKind))
            }
            Some(SkipReason::NoMetadata) => {
                eprintln!(" ! skipping {} document without metadata", header.kind);
                Ok(DocumentOutcome::Skipped(SkipReason::NoMetadata))
            }
            None => {
                self.check_duplicate(placer.target_path(&header)?, seen_paths)?;

                let path = placer.place(&header, doc)?;

                // metadata is present on every placed document
                let metadata = header.metadata.as_ref().expect("qualifying header");
                eprintln!(
                    " - {} {} {} ({})",
                    header.api_version, header.kind, metadata.name, metadata.namespace
                );

                Ok(DocumentOutcome::Placed(path))
            }
        }
    }

    /// Applies the duplicate-path policy before a write.
    fn check_duplicate(&self, path: PathBuf, seen_paths: &mut HashSet<PathBuf>) -> Result<()> {
        if seen_paths.insert(path.clone()) {
            return Ok(());
        }

        match self.config.on_duplicate {
            DuplicatePolicy::Overwrite => Ok(()),
            DuplicatePolicy::Warn => {
                warn!("Overwriting duplicate target path {}", path.display());
                Ok(())
            }
            DuplicatePolicy::Fail => Err(Error::duplicate_path(path)),
        }
    }

    /// Resolves the placement root: the configured target directory
    /// verbatim, or a fresh temporary directory kept past process exit.
    fn resolve_root(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config.target_dir {
            debug!("Using supplied target directory {}", dir.display());
            return Ok(dir.clone());
        }

        let prefix = self.config.temp_prefix();
        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?;

        // The directory is the product; disarm cleanup-on-drop.
        let dir = temp.keep();
        debug!("Allocated temporary root {}", dir.display());
        Ok(dir)
    }
}

/// Runs the complete split-and-place pipeline over one input stream.
///
/// Convenience wrapper over [`Pipeline`]; this is the main library entry
/// point.
///
/// # Errors
///
/// Returns an error if configuration validation fails or any fatal
/// condition from [`Pipeline::run`] occurs.
///
/// # Examples
///
/// ```no_run
/// use yamlsplit::{run, Config};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder().target_dir("./manifests").build()?;
/// let report = run("kind: Pod\nmetadata:\n  name: web\n", &config)?;
/// println!("{}", report.root_dir.display());
/// # Ok(())
/// # }
/// ```
pub fn run(input: &str, config: &Config) -> Result<RunReport> {
    Pipeline::new(config.clone())?.run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::{fs, path::Path};

    const MIXED_STREAM: &str = "\
apiVersion: v1
kind: Pod
metadata:
  name: web
  namespace: dev
---
# scratch notes, not a manifest
data:
  key: value
---
apiVersion: v1
kind: List
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: api
";

    fn pipeline_into(dir: &Path) -> Pipeline {
        let config = Config::builder().target_dir(dir).build().unwrap();
        Pipeline::new(config).unwrap()
    }

    #[test]
    fn test_run_mixed_stream() {
        let temp = assert_fs::TempDir::new().unwrap();
        let report = pipeline_into(temp.path()).run(MIXED_STREAM).unwrap();

        assert_eq!(report.documents(), 4);
        assert_eq!(report.placed(), 2);
        assert_eq!(report.skipped(SkipReason::NoKind), 1);
        assert_eq!(report.skipped(SkipReason::NoMetadata), 1);

        let pod = fs::read_to_string(temp.child("dev/v1/Pod/web.yml").path()).unwrap();
        assert!(pod.contains("name: web"));
        let deploy =
            fs::read_to_string(temp.child("no-namespace/apps/v1/Deployment/api.yml").path())
                .unwrap();
        assert!(deploy.contains("kind: Deployment"));
    }

    #[test]
    fn test_run_outcome_order_matches_split_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        let report = pipeline_into(temp.path()).run(MIXED_STREAM).unwrap();

        assert!(matches!(report.outcomes[0], DocumentOutcome::Placed(_)));
        assert_eq!(
            report.outcomes[1],
            DocumentOutcome::Skipped(SkipReason::NoKind)
        );
        assert_eq!(
            report.outcomes[2],
            DocumentOutcome::Skipped(SkipReason::NoMetadata)
        );
        assert!(matches!(report.outcomes[3], DocumentOutcome::Placed(_)));
    }

    #[test]
    fn test_run_empty_input() {
        let temp = assert_fs::TempDir::new().unwrap();
        let report = pipeline_into(temp.path()).run("   \n").unwrap();

        assert_eq!(report.documents(), 0);
        assert_eq!(report.root_dir, temp.path());
    }

    #[test]
    fn test_run_aborts_on_parse_error_keeping_earlier_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = "\
kind: Pod
metadata:
  name: first
---
kind: Pod
  bad: [indent
---
kind: Pod
metadata:
  name: after
";

        let err = pipeline_into(temp.path()).run(input).unwrap_err();
        assert!(err.is_parse());

        // The document before the bad one is on disk; the one after is not.
        assert!(temp
            .child("no-namespace/no-version/Pod/first.yml")
            .path()
            .exists());
        assert!(!temp
            .child("no-namespace/no-version/Pod/after.yml")
            .path()
            .exists());
    }

    #[test]
    fn test_run_duplicate_overwrite_default() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = "\
kind: Pod
metadata:
  name: same
---
kind: Pod
metadata:
  name: same
  namespace: ''
";

        let report = pipeline_into(temp.path()).run(input).unwrap();
        assert_eq!(report.placed(), 2);

        let content =
            fs::read_to_string(temp.child("no-namespace/no-version/Pod/same.yml").path()).unwrap();
        assert!(content.contains("namespace: ''"), "last write wins");
    }

    #[test]
    fn test_run_duplicate_fail_policy() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .target_dir(temp.path())
            .on_duplicate(DuplicatePolicy::Fail)
            .build()
            .unwrap();
        let input = "kind: Pod\nmetadata:\n  name: same\n---\nkind: Pod\nmetadata:\n  name: same\n";

        let err = Pipeline::new(config).unwrap().run(input).unwrap_err();
        assert!(matches!(err, Error::DuplicatePath { .. }));
    }

    #[test]
    fn test_run_allocates_temp_root() {
        let config = Config::builder().dir_suffix("-test").build().unwrap();
        let report = Pipeline::new(config)
            .unwrap()
            .run("kind: Pod\nmetadata:\n  name: x\n")
            .unwrap();

        assert!(report.root_dir.exists());
        let dir_name = report.root_dir.file_name().unwrap().to_string_lossy();
        assert!(dir_name.starts_with("yamlsplit-test"));

        fs::remove_dir_all(&report.root_dir).unwrap();
    }

    #[test]
    fn test_run_sentinel_placement() {
        let temp = assert_fs::TempDir::new().unwrap();
        let report = pipeline_into(temp.path())
            .run("kind: Pod\nmetadata:\n  name: x\n")
            .unwrap();

        assert_eq!(
            report.outcomes[0],
            DocumentOutcome::Placed(temp.path().join("no-namespace/no-version/Pod/x.yml"))
        );
    }
}
