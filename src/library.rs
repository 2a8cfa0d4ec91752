//! # Song Library
//!
//! Song keys that have already been recorded. The file holds one key per
//! line and only grows during normal operation; a set mirrors it in memory
//! so membership checks in the main loop stay cheap.

use crate::error::RipError;
use crate::filestack;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

/// Open handle on the library file plus its in-memory set.
#[derive(Debug)]
pub struct Library {
    file: File,
    songs: HashSet<String>,
}

impl Library {
    /// Opens the library file for reading and writing and loads it.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open library {}", path.display()))?;
        Self::from_file(file)
    }

    /// Loads every non-blank line of `file`, trimmed, into the set.
    pub fn from_file(mut file: File) -> Result<Self> {
        let mut raw = Vec::new();
        file.read_to_end(&mut raw).context("Failed to read library")?;

        let songs: HashSet<String> = String::from_utf8_lossy(&raw)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        log::info!("Loaded {} songs from library", songs.len());

        Ok(Self { file, songs })
    }

    #[must_use]
    pub fn contains(&self, song: &str) -> bool {
        self.songs.contains(song)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Records `song` in memory and on disk.
    pub fn add(&mut self, song: &str) -> Result<()> {
        filestack::append_line(&mut self.file, song)
            .with_context(|| format!("Failed to add `{song}' to library"))?;
        self.songs.insert(song.to_owned());
        log::debug!("Added `{song}' to library");
        Ok(())
    }

    /// Undoes the most recent addition: drops the last line of the file
    /// and its key from the set. Returns `None` if the file has no entry.
    pub fn pop_previous(&mut self) -> Result<Option<String>> {
        let line = match filestack::pop_line(&mut self.file) {
            Ok(line) => line,
            Err(RipError::OutOfBounds) => return Ok(None),
            Err(e) => return Err(e).context("Failed to pop from library"),
        };

        let song = line.trim().to_owned();
        self.songs.remove(&song);
        log::debug!("Removed `{song}' from library");
        Ok(Some(song))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn library_with(content: &str) -> (TempDir, std::path::PathBuf, Library) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library");
        fs::write(&path, content).unwrap();
        let library = Library::open(&path).unwrap();
        (dir, path, library)
    }

    #[test]
    fn test_load_skips_blank_lines_and_dedups() {
        let (_dir, _path, library) = library_with("a - b\n\n  c - d  \na - b\n   \n");
        assert_eq!(library.len(), 2);
        assert!(library.contains("a - b"));
        assert!(library.contains("c - d"));
    }

    #[test]
    fn test_add_appends_to_file() {
        let (_dir, path, mut library) = library_with("a - b\n");
        library.add("c - d").unwrap();
        assert!(library.contains("c - d"));
        assert_eq!(fs::read_to_string(path).unwrap(), "a - b\nc - d\n");
    }

    #[test]
    fn test_pop_previous_undoes_add() {
        let (_dir, path, mut library) = library_with("a - b\n");
        library.add("c - d").unwrap();

        assert_eq!(library.pop_previous().unwrap().as_deref(), Some("c - d"));
        assert!(!library.contains("c - d"));
        assert!(library.contains("a - b"));
        assert_eq!(fs::read_to_string(path).unwrap(), "a - b\n");
    }

    #[test]
    fn test_pop_previous_on_empty_library() {
        let (_dir, _path, mut library) = library_with("");
        assert!(library.is_empty());
        assert_eq!(library.pop_previous().unwrap(), None);
    }
}
