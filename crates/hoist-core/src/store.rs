//! File primitives used by the migrators
//!
//! Every failure carries the offending path.

use crate::error::{CoreError, CoreResult};
use std::fs;
use std::path::Path;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CoreError + '_ {
    move |source| CoreError::IoWithPath {
        path: path.display().to_string(),
        source,
    }
}

/// Synchronous file store
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    /// Read a whole file as text
    pub fn read(&self, folder: &Path, name: &str) -> CoreResult<String> {
        let path = folder.join(name);
        fs::read_to_string(&path).map_err(io_err(&path))
    }

    /// Read a file as an ordered list of non-blank, trimmed lines
    pub fn read_list(&self, folder: &Path, name: &str) -> CoreResult<Vec<String>> {
        Ok(self
            .read(folder, name)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Overwrite a file, creating parent directories as needed
    pub fn write(&self, folder: &Path, name: &str, content: &str) -> CoreResult<()> {
        self.ensure_folder(folder)?;
        let path = folder.join(name);
        fs::write(&path, content).map_err(io_err(&path))
    }

    /// Byte-identical copy, creating destination directories as needed
    pub fn copy(&self, src: &Path, dst: &Path) -> CoreResult<()> {
        if let Some(parent) = dst.parent() {
            self.ensure_folder(parent)?;
        }
        fs::copy(src, dst).map_err(io_err(src))?;
        Ok(())
    }

    /// Byte-identical copy that never replaces an existing `dst`. Returns
    /// `false`, leaving `dst` untouched, when it already exists.
    pub fn copy_new(&self, src: &Path, dst: &Path) -> CoreResult<bool> {
        if let Some(parent) = dst.parent() {
            self.ensure_folder(parent)?;
        }
        let mut target = match fs::OpenOptions::new().write(true).create_new(true).open(dst) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(io_err(dst)(e)),
        };
        let mut source = fs::File::open(src).map_err(io_err(src))?;
        std::io::copy(&mut source, &mut target).map_err(io_err(dst))?;
        Ok(true)
    }

    /// Idempotent directory creation
    pub fn ensure_folder(&self, path: &Path) -> CoreResult<()> {
        fs::create_dir_all(path).map_err(io_err(path))
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
