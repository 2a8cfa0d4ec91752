//! # File Stack Primitives
//!
//! The queue and the library are plain text files with one record per
//! line. They are edited in place through an open handle:
//!
//! - [`pop_line`] removes and returns the last record, scanning backwards
//!   from the end so the file is never loaded whole;
//! - [`prepend`] inserts data before everything else;
//! - [`append_line`] adds a record after everything else.
//!
//! The queue is consumed from its end, so `pop_line` on the queue yields
//! the next song and `append_line` makes a song the next one up.

use crate::error::{Result, RipError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/// Widest UTF-8 encoding of a single character.
const MAX_CHAR_BYTES: u64 = 4;

/// Removes the last line of `file` and returns it without its newline.
///
/// Trailing blank lines are consumed without being returned. The file is
/// truncated right after the newline that precedes the popped record, and
/// the cursor is left at the new end of the file.
///
/// # Errors
///
/// [`RipError::OutOfBounds`] when the file holds no record (empty, or only
/// newlines); the file is left untouched in that case.
pub fn pop_line(file: &mut File) -> Result<String> {
    file.seek(SeekFrom::End(0))?;

    let mut character = read_char_backwards(file)?;
    while character == '\n' {
        character = read_char_backwards(file)?;
    }

    let mut reversed = Vec::new();
    let mut hit_newline = false;
    while character != '\n' {
        reversed.push(character);
        match read_char_backwards(file) {
            Ok(c) => character = c,
            Err(RipError::OutOfBounds) => break,
            Err(e) => return Err(e),
        }
        hit_newline = character == '\n';
    }

    // Keep the newline that ends the previous record.
    if hit_newline {
        file.seek(SeekFrom::Current(1))?;
    }
    let end = file.stream_position()?;
    file.set_len(end)?;

    Ok(reversed.into_iter().rev().collect())
}

/// Inserts `data` at the very start of `file`, keeping the old content
/// right after it.
///
/// The old content is read first and the combined bytes go out in a
/// single write, so the file never holds a partial mix of the two.
pub fn prepend(file: &mut File, data: &str) -> Result<()> {
    file.seek(SeekFrom::Start(0))?;
    let mut old = Vec::new();
    file.read_to_end(&mut old)?;

    let mut content = Vec::with_capacity(data.len() + old.len());
    content.extend_from_slice(data.as_bytes());
    content.extend_from_slice(&old);

    file.seek(SeekFrom::Start(0))?;
    file.write_all(&content)?;
    file.flush()?;
    Ok(())
}

/// Appends `line` plus a newline at the end of `file`.
///
/// If the file does not already end in a newline one is written first,
/// so the new record never fuses with the previous one.
pub fn append_line(file: &mut File, line: &str) -> Result<()> {
    let len = file.seek(SeekFrom::End(0))?;
    if len > 0 {
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
    }

    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

/// Reads the character that ends just before the cursor and moves the
/// cursor to its first byte.
///
/// Bytes that do not finish a valid UTF-8 sequence (for instance a
/// character cut in half by an earlier truncation) are skipped one at a
/// time until a decodable character is found.
fn read_char_backwards(file: &mut File) -> Result<char> {
    let mut end = file.stream_position()?;

    while end > 0 {
        let mut buf = [0u8; MAX_CHAR_BYTES as usize];
        for width in 1..=MAX_CHAR_BYTES.min(end) {
            let start = end - width;
            let bytes = &mut buf[..width as usize];
            file.seek(SeekFrom::Start(start))?;
            file.read_exact(bytes)?;

            if let Some(c) = std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next_back()) {
                file.seek(SeekFrom::Start(start))?;
                return Ok(c);
            }
        }

        log::debug!("Skipping undecodable byte at offset {}.", end - 1);
        end -= 1;
        file.seek(SeekFrom::Start(end))?;
    }

    Err(RipError::OutOfBounds)
}
