//! `Config<T>`: a schema type bound to a file on disk.
//!
//! The store owns two instances of the schema:
//!
//! - `values` – the live configuration, public so callers can read and write
//!   fields directly.
//! - `defaults` – the compiled-in fallback, supplied once and never written
//!   to disk.
//!
//! # Lifecycle
//!
//! ```text
//! Config::new()  ──►  load()  ──►  (use / modify values)  ──►  save()
//!                       │                                        ▲
//!                       └─ file missing → defaults               │
//!                                                 drop (OnDrop) ─┘
//! ```
//!
//! Every transition that replaces `values` (load, revert, modify) notifies the
//! observers registered on `values`.
//!
//! # Concurrency
//!
//! The store is synchronous and performs no locking.  One store is expected to
//! be the only writer of its file.  Share it across threads by wrapping the
//! whole store in a `Mutex`.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error, info, trace};

use crate::error::{ConfigError, FormatError};
use crate::observer::{ConfigEvent, Subject};
use crate::serialization::{Deserializable, Format, Serializable};

/// Everything a type needs to be stored in a [`Config`].
///
/// Implemented automatically for any type with the three capabilities.
pub trait Schema: Serializable + Deserializable + Subject + Clone {}

impl<T> Schema for T where T: Serializable + Deserializable + Subject + Clone {}

/// Whether dropping a [`Config`] writes `values` back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavingPolicy {
    /// Only an explicit [`Config::save`] persists.
    #[default]
    Explicitly,
    /// [`Config::save`] is also attempted when the store is dropped.
    OnDrop,
}

/// A file-backed configuration store for schema type `T`.
///
/// Construction never fails: if the file cannot be loaded the failure is
/// logged and the store starts from `defaults`.
#[derive(Debug)]
pub struct Config<T: Schema> {
    /// The live configuration.  Direct field writes do not notify observers;
    /// use [`Config::modify`] for that.
    pub values: T,
    defaults: T,
    path: PathBuf,
    policy: SavingPolicy,
}

impl<T: Schema> Config<T> {
    /// Creates a store over `folder/filename` and performs the initial load.
    pub fn new(
        filename: impl AsRef<Path>,
        folder: impl AsRef<Path>,
        policy: SavingPolicy,
        defaults: T,
    ) -> Self {
        let path = folder.as_ref().join(filename);
        let mut config = Self {
            values: defaults.clone(),
            defaults,
            path,
            policy,
        };

        if let Err(e) = config.load() {
            error!(path = %config.path.display(), "failed to load config, using defaults: {e}");
        }
        config
    }

    /// Loads `values` from disk.
    ///
    /// A missing file is the normal first-run state: `values` is reset to the
    /// defaults and the call succeeds.  On success observers receive
    /// [`ConfigEvent::Loaded`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Open`] / [`ConfigError::Read`] for file-system failures,
    /// [`ConfigError::Format`] if the document does not parse.  In every error
    /// case `values` is left unchanged.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let Some(text) = read_file(&self.path)? else {
            debug!(path = %self.path.display(), "config file not found, falling back to defaults");
            self.apply_defaults();
            self.values.notify(ConfigEvent::Loaded);
            return Ok(());
        };

        self.values.deserialize_from(&text, Format::PRIMARY)?;
        debug!(path = %self.path.display(), "config loaded");

        self.values.notify(ConfigEvent::Loaded);
        Ok(())
    }

    /// Writes `values` to disk in the primary format.
    ///
    /// The document is written to a uniquely named temporary file in the same
    /// directory and renamed over the target, so a crash mid-write never leaves
    /// a truncated config.
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Format`] if `values` cannot be rendered (the file is not
    /// touched), [`ConfigError::Open`] if the directory or temporary file
    /// cannot be created, [`ConfigError::Write`] if writing or committing
    /// fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let text = self.values.serialize_as(Format::PRIMARY)?;
        write_file(&self.path, &text)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Resets `values` to the defaults, notifies [`ConfigEvent::Reverted`],
    /// then tries to persist.  A failed save is logged, not returned: after
    /// this call `values` always equals the defaults.
    pub fn revert_to_defaults(&mut self) {
        self.apply_defaults();
        self.values.notify(ConfigEvent::Reverted);

        match self.save() {
            Ok(()) => info!(path = %self.path.display(), "config reverted to defaults"),
            Err(e) => error!(
                path = %self.path.display(),
                "config reverted to defaults but could not be saved: {e}"
            ),
        }
    }

    /// Applies `f` to `values` and notifies [`ConfigEvent::Modified`].
    ///
    /// ```rust,ignore
    /// config.modify(|v| v.ip_address.port = 45555);
    /// ```
    pub fn modify<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.values);
        self.values.notify(ConfigEvent::Modified);
        result
    }

    /// Renders `values` in any format, e.g. JSON for a support bundle.
    /// Does not touch the file.
    ///
    /// # Errors
    ///
    /// Whatever the schema type's [`Serializable::serialize_as`] returns.
    pub fn export(&self, format: Format) -> Result<String, FormatError> {
        self.values.serialize_as(format)
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The compiled-in fallback values supplied at construction.
    pub fn defaults(&self) -> &T {
        &self.defaults
    }

    /// Whether dropping the store saves `values`.
    pub fn policy(&self) -> SavingPolicy {
        self.policy
    }

    /// Changes what happens when the store is dropped.
    pub fn set_policy(&mut self, policy: SavingPolicy) {
        self.policy = policy;
    }

    /// Consumes the store, saving first if the policy is
    /// [`SavingPolicy::OnDrop`].  Unlike a plain drop, the save result is
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// Any error from [`Config::save`].
    pub fn shutdown(mut self) -> Result<(), ConfigError> {
        // Disarm the drop hook so the file is not written twice.
        match std::mem::replace(&mut self.policy, SavingPolicy::Explicitly) {
            SavingPolicy::OnDrop => self.save(),
            SavingPolicy::Explicitly => Ok(()),
        }
    }

    /// Copies the defaults into `values`, keeping the observers registered
    /// on `values`.
    fn apply_defaults(&mut self) {
        let mut fresh = self.defaults.clone();
        std::mem::swap(fresh.observers_mut(), self.values.observers_mut());
        self.values = fresh;
    }
}

impl<T: Schema> Drop for Config<T> {
    fn drop(&mut self) {
        if self.policy != SavingPolicy::OnDrop {
            return;
        }
        if let Err(e) = self.save() {
            error!(path = %self.path.display(), "failed to save config on drop: {e}");
        }
    }
}

// ── File helpers ──────────────────────────────────────────────────────────────

/// Reads the whole file.  `Ok(None)` means the file does not exist; any other
/// failure to open it is an error.
fn read_file(path: &Path) -> Result<Option<String>, ConfigError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Open {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut text = String::new();
    let bytes = file
        .read_to_string(&mut text)
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    trace!(path = %path.display(), bytes, "read config file");
    Ok(Some(text))
}

fn write_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let dir = match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| ConfigError::Open {
        path: dir.to_path_buf(),
        source,
    })?;

    // Short random name, so the target's own name length never matters.
    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| ConfigError::Open {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    // On failure the temporary is removed when `PersistError` is dropped.
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    trace!(path = %path.display(), bytes = contents.len(), "wrote config file");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
