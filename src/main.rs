//! # SongRipper
//!
//! Records songs from a tracklist queue into a music directory.
//!
//! ## Usage
//!
//! ```bash
//! # Paste tracklist lines into the queue, then start ripping
//! cat tracklist.txt >> ~/.local/share/SongRipper/queue
//! songripper ~/Music/ripped
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use path_absolutize::Absolutize;
use songripper::cli;
use songripper::config::{self, RuntimeConfig};
use songripper::library::Library;
use songripper::queue::Queue;
use songripper::recorder::SoxRecorder;
use songripper::ripper::Ripper;
use songripper::search::{BrowserSearch, SearchEngine};
use std::fs;
use std::io;

/// Main entry point for SongRipper.
///
/// Initializes logging, resolves the data files and settings, then runs
/// the ripping loop until the queue is empty or the operator quits.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug songripper DIR` - Enable debug logging
/// - `RUST_LOG=songripper::ripper=debug songripper DIR` - State transitions only
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    let music_dir = args
        .music_directory
        .absolutize()
        .with_context(|| format!("Invalid music directory {}", args.music_directory.display()))?
        .into_owned();
    fs::create_dir_all(&music_dir)
        .with_context(|| format!("Failed to create music directory {}", music_dir.display()))?;

    let data_dir = config::get_data_dir(config::APP_NAME)?;
    let settings = RuntimeConfig::load(&data_dir)?;
    let engine: SearchEngine = settings.search_engine.parse()?;
    debug!("Using data directory {} and {engine}", data_dir.display());

    let library = Library::open(&config::data_file_path(&data_dir, config::LIBRARY_FILE)?)?;
    let queue = Queue::open(&config::data_file_path(&data_dir, config::QUEUE_FILE)?)?;

    let mut ripper = Ripper::new(
        queue,
        library,
        music_dir,
        SoxRecorder::new(&settings),
        BrowserSearch::new(engine),
        io::stdin().lock(),
        io::stdout(),
    );
    let exit = ripper.run()?;
    info!("Stopped: {exit:?}");

    Ok(())
}
