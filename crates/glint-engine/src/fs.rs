//! File access used by asset loading and live reload.
//!
//! The renderer only needs two primitives: read a whole file and query its
//! modification time. [`DiskFs`] forwards to `std::fs`; [`MemoryFs`] keeps
//! files in a map with a logical clock, for tools and tests that should not
//! touch the disk.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub trait FileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn exists(&self, path: &Path) -> bool {
        self.modified(path).is_ok()
    }
}

/// The real file system.
#[derive(Debug, Copy, Clone, Default)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[derive(Debug, Clone)]
struct MemoryFile {
    bytes: Vec<u8>,
    modified: SystemTime,
}

/// In-memory file system.
///
/// Every write advances a logical clock by one second, so a rewrite always
/// yields a strictly newer modification time.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    files: HashMap<PathBuf, MemoryFile>,
    locked: HashSet<PathBuf>,
    clock: SystemTime,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            locked: HashSet::new(),
            clock: SystemTime::UNIX_EPOCH,
        }
    }

    /// Builder-style [`write`](Self::write).
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.write(path, bytes);
        self
    }

    /// Creates or replaces a file and stamps it with the next clock tick.
    pub fn write(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        let modified = self.tick();
        self.files.insert(path.into(), MemoryFile { bytes: bytes.into(), modified });
    }

    /// Bumps the modification time without changing contents.
    /// Returns `false` when the file does not exist.
    pub fn touch(&mut self, path: impl AsRef<Path>) -> bool {
        let modified = self.tick();
        match self.files.get_mut(path.as_ref()) {
            Some(file) => {
                file.modified = modified;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, path: impl AsRef<Path>) -> bool {
        self.files.remove(path.as_ref()).is_some()
    }

    /// Makes [`modified`](FileSystem::modified) fail for `path` until
    /// [`unlock`](Self::unlock), the way a file being saved can briefly have
    /// no readable metadata. Contents stay readable.
    pub fn lock(&mut self, path: impl Into<PathBuf>) {
        self.locked.insert(path.into());
    }

    pub fn unlock(&mut self, path: impl AsRef<Path>) {
        self.locked.remove(path.as_ref());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn tick(&mut self) -> SystemTime {
        self.clock += Duration::from_secs(1);
        self.clock
    }

    fn file(&self, path: &Path) -> io::Result<&MemoryFile> {
        self.files.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.file(path).map(|f| f.bytes.clone())
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        if self.locked.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is locked", path.display()),
            ));
        }
        self.file(path).map(|f| f.modified)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
