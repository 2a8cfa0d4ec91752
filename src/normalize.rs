//! # Tracklist Line Normalizer
//!
//! Turns a raw tracklist line, as exported from a release page, into the
//! canonical `artist - title` song key. The key doubles as the library
//! membership key and as the base of the recording's filename.
//!
//! ```
//! use songripper::normalize::to_artist_title;
//!
//! assert_eq!(to_artist_title("Portishead (2)* – Roads"), "Portishead - Roads");
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_DASH: Regex = Regex::new(r"^–").unwrap();
    static ref DISAMBIGUATOR: Regex = Regex::new(r" \(\d+\)").unwrap();
    static ref ASTERISK: Regex = Regex::new(r"\*").unwrap();
    static ref DASH: Regex = Regex::new(r"–").unwrap();
    static ref FILE_NOTE: Regex = Regex::new(r" \(File.*?\).*").unwrap();
    static ref LEADING_A: Regex = Regex::new(r"^A").unwrap();
    static ref LEADING_SPACE: Regex = Regex::new(r"^ ").unwrap();
    static ref SPACES: Regex = Regex::new(r" +").unwrap();
}

/// Rewrites a raw line into its song key.
///
/// The rewrites run in a fixed order; each one sees the output of the
/// previous. A leading `A` is replaced by a space and then dropped, which
/// is a quirk of one export format and applies to every line that starts
/// with a capital A.
#[must_use]
pub fn to_artist_title(line: &str) -> String {
    let line = LEADING_DASH.replace(line, "");
    let line = DISAMBIGUATOR.replace_all(&line, " ");
    let line = ASTERISK.replace_all(&line, "");
    let line = DASH.replace_all(&line, " - ");
    let line = FILE_NOTE.replace_all(&line, "");
    let line = LEADING_A.replace(&line, " ");
    let line = LEADING_SPACE.replace(&line, "");
    let line = SPACES.replace_all(&line, " ");

    log::trace!("Normalized `{line}'.");
    line.into_owned()
}
