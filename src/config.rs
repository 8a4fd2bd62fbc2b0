use crate::error::{Error, Result};
use std::path::PathBuf;

/// Temp-directory name prefix used when no target directory is supplied.
pub(crate) const TEMP_DIR_PREFIX: &str = "yamlsplit";

/// Policy applied when two documents derive the same target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Silently overwrite; the last document wins.
    #[default]
    Overwrite,
    /// Overwrite, but log a warning naming the colliding path.
    Warn,
    /// Abort the run with [`Error::DuplicatePath`].
    Fail,
}

/// Configuration for a yamlsplit run.
///
/// Use [`Config::builder()`] to construct a new configuration. All target
/// directory and suffix decisions are made here, once, at process start;
/// the pipeline never consults the environment itself.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Config {
    /// Root directory for placed files. When `None`, a fresh temporary
    /// directory is allocated for the run.
    pub target_dir: Option<PathBuf>,

    /// Suffix appended to the temporary directory name. Ignored when
    /// `target_dir` is set.
    pub dir_suffix: String,

    /// What to do when two documents derive the same path.
    pub on_duplicate: DuplicatePolicy,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlsplit::Config;
    ///
    /// let config = Config::builder()
    ///     .dir_suffix("-staging")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// A nonexistent `target_dir` is accepted: placement creates it along
    /// with the per-document subdirectories. A `target_dir` that exists but
    /// is not a directory is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if `target_dir` points at an existing non-directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.target_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::config("target_dir must not be empty"));
            }
            if dir.exists() && !dir.is_dir() {
                return Err(Error::config(format!(
                    "Target path is not a directory: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Returns the temp-directory name prefix for this configuration.
    #[must_use]
    pub(crate) fn temp_prefix(&self) -> String {
        format!("{TEMP_DIR_PREFIX}{}", self.dir_suffix)
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    target_dir: Option<PathBuf>,
    dir_suffix: Option<String>,
    on_duplicate: Option<DuplicatePolicy>,
}

impl ConfigBuilder {
    /// Sets an explicit target directory, used verbatim as the placement root.
    #[must_use]
    pub fn target_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(path.into());
        self
    }

    /// Sets the temp-directory name suffix.
    #[must_use]
    pub fn dir_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dir_suffix = Some(suffix.into());
        self
    }

    /// Sets the duplicate-path policy.
    #[must_use]
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = Some(policy);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            target_dir: self.target_dir,
            dir_suffix: self.dir_suffix.unwrap_or_default(),
            on_duplicate: self.on_duplicate.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
