//! Migration sources: read-only hierarchical stores of migration files.
//!
//! The reader only needs two capabilities from a store: list the entries at
//! its root and read one entry's bytes. [`DirSource`] serves a directory on
//! disk; [`MemorySource`] serves files held in memory, which is how hosts
//! that embed their migrations with `include_str!` hand them to the engine.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a source entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single entry at the root of a migration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl SourceEntry {
    /// Create a file entry
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A read-only hierarchical store of migration files.
pub trait MigrationSource {
    /// List the entries at the root of the store.
    fn entries(&self) -> io::Result<Vec<SourceEntry>>;

    /// Read the full content of the named root-level file.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Human-readable location, used in log and error messages.
    fn describe(&self) -> String {
        "<migration source>".to_string()
    }
}

impl<S: MigrationSource + ?Sized> MigrationSource for &S {
    fn entries(&self) -> io::Result<Vec<SourceEntry>> {
        (**self).entries()
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Migration source backed by a filesystem directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serve the files directly inside `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Narrow the source to a subdirectory of its root.
    pub fn sub(&self, dir: impl AsRef<Path>) -> Self {
        Self {
            root: self.root.join(dir),
        }
    }

    /// Directory this source reads from
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MigrationSource for DirSource {
    fn entries(&self) -> io::Result<Vec<SourceEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks so a linked directory is still a directory.
            let kind = if std::fs::metadata(entry.path())?.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(SourceEntry { name, kind });
        }
        Ok(entries)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory migration source keyed by `/`-separated paths.
///
/// ```
/// use sw_core::{MemorySource, MigrationSource};
///
/// let source = MemorySource::from_static(&[
///     ("migrations/1_init.sql", "CREATE TABLE users (id INTEGER PRIMARY KEY);"),
/// ])
/// .sub("migrations");
/// assert_eq!(source.entries().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from `(path, contents)` pairs, typically `include_str!` output.
    pub fn from_static(files: &[(&str, &str)]) -> Self {
        files
            .iter()
            .fold(Self::new(), |source, (path, contents)| {
                source.with_file(*path, contents.as_bytes())
            })
    }

    /// Add a file at `path`.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        let path = normalize(&path.into());
        self.files.insert(path, contents.into());
        self
    }

    /// Add an (possibly empty) directory at `path`.
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        self.dirs.insert(normalize(&path.into()));
        self
    }

    /// Narrow the source to everything under `prefix`.
    pub fn sub(&self, prefix: &str) -> Self {
        let prefix = format!("{}/", normalize(prefix));
        let files = self
            .files
            .iter()
            .filter_map(|(path, contents)| {
                path.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), contents.clone()))
            })
            .collect();
        let dirs = self
            .dirs
            .iter()
            .filter_map(|path| path.strip_prefix(&prefix).map(str::to_string))
            .collect();
        Self { files, dirs }
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl MigrationSource for MemorySource {
    fn entries(&self) -> io::Result<Vec<SourceEntry>> {
        let mut entries: BTreeMap<&str, EntryKind> = BTreeMap::new();
        for path in self.files.keys() {
            match path.split_once('/') {
                Some((dir, _)) => entries.insert(dir, EntryKind::Directory),
                None => entries.insert(path.as_str(), EntryKind::File),
            };
        }
        for path in &self.dirs {
            let top = path.split('/').next().unwrap_or(path.as_str());
            if !top.is_empty() {
                entries.insert(top, EntryKind::Directory);
            }
        }
        Ok(entries
            .into_iter()
            .map(|(name, kind)| SourceEntry {
                name: name.to_string(),
                kind,
            })
            .collect())
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {name}"))
        })
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
