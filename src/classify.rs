//! # Song Classifier
//!
//! Tracklist exports mix playable tracks with credit lines such as
//! `Producer, Engineer – Jane Doe`. This module tells them apart on the
//! *raw* line, before normalization. The heuristic is tuned to one export
//! format; it only has to be reproducible, not perfect.

use lazy_static::lazy_static;
use regex::Regex;

/// Contributor roles that introduce a credit line.
const CREDIT_TYPES: &str = "Lyrics|Vocals|Written|Additional|Uncredited|Remix|Producer|Featuring|Engineer|Conductor|Programmed|Drums|Guest|Appearance";

lazy_static! {
    static ref CREDIT_LINE: Regex = {
        let credit = format!(r"(?:, )?(?:{CREDIT_TYPES})(?:[- ]?By)?");
        let credits = format!(r"(?:{credit})+");
        Regex::new(&format!(r"^.*{credits}(?: \[{credits}\])? – .*")).unwrap()
    };
    static ref ANY_DASH: Regex = Regex::new(r"[–-]").unwrap();
}

/// Whether `line` names a track rather than a credit.
///
/// Rejected lines:
/// - one or more comma separated roles (optionally `-By`/` By`), an
///   optional bracketed role block, then ` – ` and the credited name;
/// - lines indented with a tab;
/// - lines without any hyphen or en-dash.
#[must_use]
pub fn is_song(line: &str) -> bool {
    let rejected =
        CREDIT_LINE.is_match(line) || line.starts_with('\t') || !ANY_DASH.is_match(line);

    if rejected {
        log::trace!("Rejected `{line}' as a credit line.");
    }
    !rejected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_title_line_is_song() {
        assert!(is_song("Massive Attack – Teardrop"));
        assert!(is_song("Burial - Archangel"));
    }

    #[test]
    fn test_single_credit_rejected() {
        assert!(!is_song("Lyrics By – John Smith"));
        assert!(!is_song("Written-By – Jane Doe"));
    }

    #[test]
    fn test_multiple_credits_rejected() {
        assert!(!is_song("Producer, Engineer – Someone Else"));
        assert!(!is_song("Drums, Programmed By – Another Person"));
    }

    #[test]
    fn test_bracketed_secondary_credit_rejected() {
        assert!(!is_song("Vocals [Featuring] – Elizabeth Fraser"));
    }

    #[test]
    fn test_tab_indented_line_rejected() {
        assert!(!is_song("\tMixed By – Someone"));
        assert!(!is_song("\tArtist – Title"));
    }

    #[test]
    fn test_line_without_dash_rejected() {
        assert!(!is_song("Interlude"));
        assert!(!is_song(""));
    }

    #[test]
    fn test_decision_is_reproducible() {
        let line = "Conductor – Orchestra Person";
        assert_eq!(is_song(line), is_song(line));
    }
}
