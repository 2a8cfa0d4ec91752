//! # Filename Sanitizer
//!
//! Maps a song key to a path the recorder can safely write to. Characters
//! outside a small allow-list are dropped, the final component is capped
//! at 255 UTF-8 bytes and the whole path at 4096 characters, mirroring
//! common filesystem limits.

use std::path::{Path, PathBuf};

/// Punctuation kept alongside alphanumerics.
const ALLOWED_PUNCTUATION: &str = " ._-+*()&'!#/";

/// Longest final path component, in bytes.
pub const MAX_NAME_BYTES: usize = 255;

/// Longest full path, in characters.
pub const MAX_PATH_CHARS: usize = 4096;

/// Strips illegal characters from `path` and enforces the length limits.
///
/// When the full path is too long the directory part is shortened, so
/// the file name and its extension always survive.
#[must_use]
pub fn safe_filepath(path: &str) -> String {
    let filtered: String = path
        .chars()
        .filter(|c| c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(*c))
        .collect();
    let filtered = filtered.trim_end();

    let (dirs, name_ext) = split(filtered);
    let name_ext = truncate_bytes(name_ext, MAX_NAME_BYTES).trim_end();
    let (name, extension) = split_extension(name_ext);

    // The final component is kept whole; only the directories give way.
    let budget = MAX_PATH_CHARS.saturating_sub(name_ext.chars().count() + 1);
    let dirs = trim_dir(take_chars(dirs, budget));

    let mut safe = join(dirs, name);
    safe.push_str(extension);
    safe
}

/// Where the recording of `artist_title` lands inside `music_dir`.
///
/// ```
/// use songripper::sanitize::song_path;
/// use std::path::Path;
///
/// assert_eq!(
///     song_path("foo - bar", Path::new("/home/me/my music")),
///     Path::new("/home/me/my music/foo - bar.mp3"),
/// );
/// ```
#[must_use]
pub fn song_path(artist_title: &str, music_dir: &Path) -> PathBuf {
    let joined = join(&music_dir.to_string_lossy(), &format!("{artist_title}.mp3"));
    PathBuf::from(safe_filepath(&joined))
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a
/// multi-byte character.
fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// First `max` characters of `s`.
fn take_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(i, _)| &s[..i])
}

/// Drops trailing slashes unless the directory is the root.
fn trim_dir(dir: &str) -> &str {
    if dir.is_empty() || dir.chars().all(|c| c == '/') {
        dir
    } else {
        dir.trim_end_matches('/')
    }
}

/// Splits into directory part and final component at the last `/`.
/// Trailing slashes are dropped from the directory unless it is all
/// slashes (the root).
fn split(path: &str) -> (&str, &str) {
    let cut = path.rfind('/').map_or(0, |i| i + 1);
    let (head, tail) = path.split_at(cut);
    (trim_dir(head), tail)
}

/// Splits `name.ext` at the last dot. Leading dots belong to the name, so
/// `.hidden` has no extension.
fn split_extension(name_ext: &str) -> (&str, &str) {
    match name_ext.rfind('.') {
        Some(dot) if name_ext[..dot].chars().any(|c| c != '.') => name_ext.split_at(dot),
        _ => (name_ext, ""),
    }
}

fn join(dir: &str, name: &str) -> String {
    if name.starts_with('/') || dir.is_empty() {
        name.to_owned()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}
