//! Recursive discovery of NodeScript sources
//!
//! `source_files` walks a directory tree depth-first and yields every regular
//! file carrying the source extension. The walk is lazy: directories are
//! opened as the iterator advances, so a large tree never has to be collected
//! up front. Calling `source_files` again starts a fresh walk reflecting the
//! current filesystem state.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::SOURCE_EXT;

/// Start a lazy depth-first walk over the source files under `root`.
///
/// Entries are yielded in directory-listing order, which is not sorted.
/// Directory-read failures are yielded as errors rather than suppressed.
pub fn source_files(root: &Path) -> SourceWalk {
    SourceWalk {
        start: Some(root.to_path_buf()),
        stack: Vec::new(),
    }
}

/// Iterator over the `.ns` files below a directory root
pub struct SourceWalk {
    start: Option<PathBuf>,
    stack: Vec<fs::ReadDir>,
}

impl Iterator for SourceWalk {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.start.take() {
            match fs::read_dir(&root) {
                Ok(entries) => self.stack.push(entries),
                Err(e) => return Some(Err(e)),
            }
        }

        while let Some(entries) = self.stack.last_mut() {
            match entries.next() {
                Some(Ok(entry)) => {
                    let path = entry.path();
                    let file_type = match entry.file_type() {
                        Ok(t) => t,
                        Err(e) => return Some(Err(e)),
                    };

                    if file_type.is_dir() {
                        match fs::read_dir(&path) {
                            Ok(sub) => self.stack.push(sub),
                            Err(e) => return Some(Err(e)),
                        }
                    } else if file_type.is_file()
                        && path.extension() == Some(OsStr::new(SOURCE_EXT))
                    {
                        return Some(Ok(path));
                    }
                    // Other extensions and non-regular files are skipped.
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.stack.pop();
                }
            }
        }

        None
    }
}
