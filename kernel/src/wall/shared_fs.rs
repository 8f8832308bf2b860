// Shared Filesystem Wall Store
//
// The production store: one newline-delimited file on a filesystem
// mount attached to every invocation context. Advisory locks are the
// only coordination between uncoordinated writers and readers: shared
// for the whole read, exclusive for the whole append. Lock acquisition
// blocks with no timeout; ordering is whatever the filesystem's
// advisory-lock layer provides.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::store::{ReadOutcome, WallStore};
use super::WallError;

/// File-backed store at a fixed path on the shared mount.
#[derive(Debug, Clone)]
pub struct SharedFsStore {
    path: PathBuf,
}

impl SharedFsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WallStore for SharedFsStore {
    fn read_all(&self) -> Result<ReadOutcome, WallError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ReadOutcome::Absent),
            Err(err) => return Err(err.into()),
        };

        fs2::FileExt::lock_shared(&file)?;
        let mut text = String::new();
        let read = file.read_to_string(&mut text);
        let unlock = fs2::FileExt::unlock(&file);
        read?;
        unlock?;

        Ok(ReadOutcome::Found(text))
    }

    fn append(&self, message: &str) -> Result<(), WallError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        // Single write_all under the exclusive lock: the line lands whole.
        let mut line = String::with_capacity(message.len() + 1);
        line.push_str(message);
        line.push('\n');

        fs2::FileExt::lock_exclusive(&file)?;
        let written = file.write_all(line.as_bytes());
        let unlock = fs2::FileExt::unlock(&file);
        written?;
        unlock?;

        Ok(())
    }

    fn delete_all(&self) -> Result<(), WallError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Every file currently under `root`, recursively.
///
/// Unreadable entries are skipped; a missing root yields an empty list.
pub fn list_mount_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
