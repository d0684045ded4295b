use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::codec;
use crate::config::StoreOptions;
use crate::error::{StoreError, StoreResult};
use crate::paths::{is_writable, parent_dir, probe_target};
use crate::value::{Sequence, Value};

/// A sequence of [`Value`]s persisted as a single file.
///
/// Every call loads or rewrites the whole file; nothing is cached and no file
/// handle outlives a call. [`SequenceStore::append`] and
/// [`SequenceStore::prepend`] are an unlocked read-modify-write: two writers
/// sharing a file, in one process or several, can lose each other's updates.
#[derive(Debug, Clone)]
pub struct SequenceStore {
    path: PathBuf,
    options: StoreOptions,
}

impl SequenceStore {
    /// Binds a store to `path` with default options.
    ///
    /// Fails with [`StoreError::UnwritableTarget`] when the file exists but is
    /// not writable, or does not exist and its directory is not writable.
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::with_options(path, StoreOptions::default())
    }

    /// Binds a store with explicit options. With [`StoreOptions::atomic`] the
    /// containing directory must be writable even when the file exists.
    pub fn with_options(path: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let target = probe_target(&path);
        if !is_writable(&target) {
            return Err(StoreError::unwritable(target));
        }

        // Atomic replacement creates and renames a sibling file, so the
        // directory must accept writes even when the file already does.
        if options.atomic {
            let dir = parent_dir(&path);
            if !is_writable(&dir) {
                return Err(StoreError::unwritable(dir));
            }
        }

        Ok(Self { path, options })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Loads the stored sequence.
    ///
    /// Missing, unreadable, empty and undecodable files all read as an empty
    /// sequence, as does a payload that is `null` or not a list.
    #[must_use]
    pub fn read(&self) -> Sequence {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist; reading empty", self.path.display());
                return Sequence::new();
            }
            Err(error) => {
                log::debug!(
                    "{} is not readable ({error}); reading empty",
                    self.path.display()
                );
                return Sequence::new();
            }
        };

        log::trace!("read {} bytes from {}", bytes.len(), self.path.display());
        codec::decode(&bytes)
    }

    /// Replaces the file content with `items`.
    ///
    /// Returns false instead of an error when the sequence cannot be encoded or
    /// the file cannot be written.
    pub fn write(&self, items: &[Value]) -> bool {
        match self.try_write(items) {
            Ok(written) => written > 0,
            Err(error) => {
                log::warn!("{error}");
                false
            }
        }
    }

    /// Fallible form of [`SequenceStore::write`], returning the byte count.
    pub fn try_write(&self, items: &[Value]) -> StoreResult<usize> {
        let bytes = codec::encode(items, self.options.pretty)
            .map_err(|source| StoreError::encode(&self.path, source))?;

        if self.options.atomic {
            self.replace_atomically(&bytes)?;
        } else {
            self.replace_in_place(&bytes)?;
        }

        log::trace!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(bytes.len())
    }

    /// Adds `value` after the last stored element.
    pub fn append(&self, value: impl Into<Value>) -> bool {
        let mut items = self.read();
        items.push(value.into());
        self.write(&items)
    }

    /// Adds `value` before the first stored element.
    pub fn prepend(&self, value: impl Into<Value>) -> bool {
        let mut items = self.read();
        items.insert(0, value.into());
        self.write(&items)
    }

    fn replace_in_place(&self, bytes: &[u8]) -> StoreResult<()> {
        let mut file = File::create(&self.path)
            .map_err(|source| StoreError::io("opening sequence file", &self.path, source))?;
        file.write_all(bytes)
            .map_err(|source| StoreError::io("writing sequence file", &self.path, source))?;

        if self.options.sync {
            file.sync_all()
                .map_err(|source| StoreError::io("syncing sequence file", &self.path, source))?;
        }

        Ok(())
    }

    fn replace_atomically(&self, bytes: &[u8]) -> StoreResult<()> {
        let dir = parent_dir(&self.path);
        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|source| StoreError::io("creating temporary file", &dir, source))?;
        temp.write_all(bytes)
            .map_err(|source| StoreError::io("writing temporary file", temp.path(), source))?;

        match fs::metadata(&self.path) {
            Ok(metadata) => temp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|source| {
                    StoreError::io("copying permissions to temporary file", temp.path(), source)
                })?,
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StoreError::io("inspecting sequence file", &self.path, source));
            }
        }

        if self.options.sync {
            temp.as_file()
                .sync_all()
                .map_err(|source| StoreError::io("syncing temporary file", temp.path(), source))?;
        }

        temp.persist(&self.path).map_err(|error| {
            StoreError::io("renaming temporary file over", &self.path, error.error)
        })?;

        Ok(())
    }
}
