//! Filesystem collaborator seam.
//!
//! The pipeline never touches `std::fs` directly; it asks a [`Filesystem`]
//! about existence, file-ness, extensions, and raw bytes. Production code
//! uses [`OsFilesystem`]; tests can substitute an in-memory fake.

use std::fs;
use std::io;
use std::path::Path;

/// Synchronous filesystem queries used by content classification, style
/// resolution, and image embedding. No caching is assumed.
pub trait Filesystem {
    /// Does anything exist at `path`?
    fn exists(&self, path: &Path) -> bool;

    /// Does `path` name a regular file?
    fn is_file(&self, path: &Path) -> bool;

    /// The extension of `path`, if it has one. Case is preserved.
    fn extension(&self, path: &Path) -> Option<String>;

    /// Read the raw bytes at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn extension(&self, path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_string())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}
