//! Rip a tracklist queue into a music library, one recording at a time.
//!
//! Core modules:
//! - [`ripper`] - Main loop and interrupt recovery
//! - [`filestack`] - Pop/prepend/append primitives on line files
//! - [`queue`] - Raw tracklist lines waiting to be ripped
//! - [`library`] - Song keys already ripped
//!
//! ### Supporting Modules
//!
//! - [`normalize`] - Raw line to `artist - title` song key
//! - [`classify`] - Song vs. credit line heuristic
//! - [`sanitize`] - Song key to safe MP3 path
//! - [`recorder`] - SoX `rec` adapter with Ctrl-C handling
//! - [`search`] - Browser web search
//! - [`menu`] - Interrupt recovery menu
//! - [`config`] - Data directory and runtime settings
//! - [`cli`] - Command-line interface definitions with clap
//! - [`error`] - Typed error conditions
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use songripper::{config, library::Library, queue::Queue};
//! use songripper::recorder::SoxRecorder;
//! use songripper::ripper::Ripper;
//! use songripper::search::{BrowserSearch, SearchEngine};
//! use std::io;
//! use std::path::PathBuf;
//!
//! let data_dir = config::get_data_dir(config::APP_NAME)?;
//! let settings = config::RuntimeConfig::load(&data_dir)?;
//! let queue = Queue::open(&config::data_file_path(&data_dir, config::QUEUE_FILE)?)?;
//! let library = Library::open(&config::data_file_path(&data_dir, config::LIBRARY_FILE)?)?;
//!
//! let mut ripper = Ripper::new(
//!     queue,
//!     library,
//!     PathBuf::from("/home/me/Music"),
//!     SoxRecorder::new(&settings),
//!     BrowserSearch::new(SearchEngine::DuckDuckGo),
//!     io::stdin().lock(),
//!     io::stdout(),
//! );
//! ripper.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Persisted State
//!
//! - `queue`: raw tracklist lines, consumed from the **end** of the file.
//! - `library`: one song key per line, appended on each successful rip.
//!
//! ## Error Handling
//!
//! Public functions return `anyhow::Result` with context; conditions the
//! caller branches on are [`error::RipError`] variants.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod filestack;
pub mod library;
pub mod menu;
pub mod normalize;
pub mod queue;
pub mod recorder;
pub mod ripper;
pub mod sanitize;
pub mod search;
