//! Size-rotated append-only file.
//!
//! Trace batches are appended one JSON document per line. Once the file
//! grows past the size limit it is renamed to `<name>.<timestamp>` and a
//! fresh file is started; only the newest backups are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the live file is rotated (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Append-only line writer with size-based rotation.
///
/// The file is opened lazily on the first write and shared behind a mutex,
/// because the exporter may be called from the plugin and worker threads.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// A writer for `path` with the default limits.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when rotating, opening or writing
    /// fails, or when another writer panicked while holding the lock.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        let file = match handle.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = handle.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6f");
        let mut backup = self.backup_name(&stamp.to_string());
        let mut n = 1;
        while backup.exists() {
            backup = self.backup_name(&format!("{stamp}-{n}"));
            n += 1;
        }

        if self.path.exists() {
            fs::rename(&self.path, &backup)?;
        }
        self.prune_backups()
    }

    fn backup_name(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Deletes all but the newest `max_backups` backups. Backup suffixes are
    /// UTC timestamps, so name order is age order.
    fn prune_backups(&self) -> io::Result<()> {
        let (Some(dir), Some(name)) = (
            self.path.parent(),
            self.path.file_name().and_then(|n| n.to_str()),
        ) else {
            return Ok(());
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();
        backups.sort();

        let excess = backups.len().saturating_sub(self.max_backups);
        for old in &backups[..excess] {
            if let Err(e) = fs::remove_file(old) {
                eprintln!("homescout: could not remove old trace file {}: {e}", old.display());
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("trace.json."))
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("trace.json"));
        file.append_line("{\"a\":1}").unwrap();
        file.append_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::with_limits(dir.path().join("trace.json"), 8, 2);

        for i in 0..6 {
            file.append_line(&format!("line-{i}-padding")).unwrap();
        }

        assert_eq!(backups(dir.path()), 2);
        let live = fs::read_to_string(file.path()).unwrap();
        assert_eq!(live, "line-5-padding\n");
    }
}
