//! # Tracklist Queue
//!
//! Raw tracklist lines waiting to be ripped, persisted one per line. The
//! queue is a stack: the *last* line of the file is the next one out.
//! Lines are pasted into the file by hand, outside this program.

use crate::error::RipError;
use crate::filestack;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open handle on the queue file.
#[derive(Debug)]
pub struct Queue {
    file: File,
}

impl Queue {
    /// Opens the queue file for reading and writing.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open queue {}", path.display()))?;
        Ok(Self::from_file(file))
    }

    #[must_use]
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Takes the next raw line off the queue, or `None` once it is empty.
    pub fn pop(&mut self) -> Result<Option<String>> {
        match filestack::pop_line(&mut self.file) {
            Ok(line) => Ok(Some(line)),
            Err(RipError::OutOfBounds) => Ok(None),
            Err(e) => Err(e).context("Failed to pop from queue"),
        }
    }

    /// Puts `line` where it will be popped next.
    pub fn push_next(&mut self, line: &str) -> Result<()> {
        filestack::append_line(&mut self.file, line).context("Failed to append to queue")
    }

    /// Puts `line` where it will be popped after everything else.
    pub fn push_last(&mut self, line: &str) -> Result<()> {
        filestack::prepend(&mut self.file, &format!("{line}\n")).context("Failed to prepend to queue")
    }
}
