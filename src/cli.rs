//! # Command-Line Interface Module
//!
//! SongRipper takes a single argument, the directory recordings go to.
//! The queue and library live in the data directory (see
//! [`crate::config`]).
//!
//! ## Example
//!
//! ```bash
//! songripper ~/Music/ripped
//! RUST_LOG=songripper=debug songripper ~/Music/ripped
//! ```

use clap::Parser;
use std::path::PathBuf;

/// SongRipper: record a tracklist queue, one song at a time.
///
/// Pops lines from the queue, opens a web search for each song, and
/// records it with SoX `rec` until trailing silence. Press Ctrl-C during
/// a recording for the recovery menu.
#[derive(Parser, Debug)]
#[command(name = "songripper")]
#[command(version, about, long_about)]
pub struct Args {
    /// Directory the MP3 recordings are written to
    #[arg(value_name = "MUSIC_DIRECTORY", value_hint = clap::ValueHint::DirPath)]
    pub music_directory: PathBuf,
}
