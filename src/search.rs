//! # Web Search Launcher
//!
//! Opens the operator's default browser on a search for the song about to
//! be recorded, so they can find and start playing it.

use crate::error::RipError;
use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;

/// Search backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    DuckDuckGo,
}

impl SearchEngine {
    /// Search URL for `terms`, with every reserved character escaped.
    #[must_use]
    pub fn url(self, terms: &str) -> String {
        match self {
            Self::DuckDuckGo => format!("https://duckduckgo.com/?q={}", urlencoding::encode(terms)),
        }
    }
}

impl FromStr for SearchEngine {
    type Err = RipError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "duckduckgo" => Ok(Self::DuckDuckGo),
            other => Err(RipError::UnsupportedSearchBackend(other.to_string())),
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuckDuckGo => f.write_str("duckduckgo"),
        }
    }
}

/// Something that can look a song up for the operator.
pub trait WebSearch {
    /// Starts a search for `terms`; nothing is read back.
    fn search(&mut self, terms: &str) -> Result<()>;
}

/// [`WebSearch`] through the system default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSearch {
    engine: SearchEngine,
}

impl BrowserSearch {
    #[must_use]
    pub fn new(engine: SearchEngine) -> Self {
        Self { engine }
    }
}

impl WebSearch for BrowserSearch {
    fn search(&mut self, terms: &str) -> Result<()> {
        web_search(terms, self.engine)
    }
}

/// Opens the default browser on `engine`'s results for `terms`.
pub fn web_search(terms: &str, engine: SearchEngine) -> Result<()> {
    let url = engine.url(terms);
    log::debug!("Opening {url}");
    webbrowser::open(&url).with_context(|| format!("Failed to open browser on {url}"))
}

/// The phrase searched for a song: its key in double quotes.
#[must_use]
pub fn quoted(song: &str) -> String {
    format!("\"{song}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duckduckgo_url_escapes_everything() {
        assert_eq!(
            SearchEngine::DuckDuckGo.url(&quoted("AC/DC - T.N.T & more")),
            "https://duckduckgo.com/?q=%22AC%2FDC%20-%20T.N.T%20%26%20more%22"
        );
    }

    #[test]
    fn test_parse_known_engine() {
        assert_eq!("duckduckgo".parse::<SearchEngine>().unwrap(), SearchEngine::DuckDuckGo);
        assert_eq!(SearchEngine::DuckDuckGo.to_string(), "duckduckgo");
    }

    #[test]
    fn test_parse_unknown_engine_is_not_implemented() {
        let err = "google".parse::<SearchEngine>().unwrap_err();
        assert!(matches!(err, RipError::UnsupportedSearchBackend(ref name) if name == "google"));
        assert_eq!(err.to_string(), "search engine `google` is not implemented");
    }

    #[test]
    fn test_quoted() {
        assert_eq!(quoted("foo - bar"), "\"foo - bar\"");
    }
}
