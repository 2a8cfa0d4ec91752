//! # Ripping Orchestrator
//!
//! Drives the main loop as a state machine:
//!
//! ```text
//! Idle ──pop──> Searching ──> Recording ──done──> Idle
//!  │  (skip: known or credit line) ↺        │
//!  │                                        └─Ctrl-C─> InterruptMenu ──> Idle
//!  └─queue empty──> Done                                      └─quit──> Done
//! ```
//!
//! All mutable state (queue, library, collaborators, terminal) lives in
//! [`Ripper`] and is released when it is dropped, on every exit path.

use crate::classify::is_song;
use crate::library::Library;
use crate::menu::{self, MenuAction};
use crate::normalize::to_artist_title;
use crate::queue::Queue;
use crate::recorder::{RecordOutcome, Recorder};
use crate::sanitize::song_path;
use crate::search::{quoted, WebSearch};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Why the main loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Every queued line was handled.
    QueueEmpty,
    /// The operator chose Quit from the interrupt menu.
    Quit,
}

/// A song in flight: the raw queue line and its song key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub line: String,
    pub song: String,
}

#[derive(Debug)]
enum State {
    Idle,
    Searching(Track),
    Recording(Track),
    InterruptMenu(Track),
    Done(Exit),
}

/// Queue/library bookkeeping around a recorder and a web search.
pub struct Ripper<R, S, I, O> {
    queue: Queue,
    library: Library,
    music_dir: PathBuf,
    recorder: R,
    search: S,
    input: I,
    output: O,
}

impl<R, S, I, O> Ripper<R, S, I, O>
where
    R: Recorder,
    S: WebSearch,
    I: BufRead,
    O: Write,
{
    pub fn new(
        queue: Queue,
        library: Library,
        music_dir: PathBuf,
        recorder: R,
        search: S,
        input: I,
        output: O,
    ) -> Self {
        Self { queue, library, music_dir, recorder, search, input, output }
    }

    /// Processes the queue until it is empty or the operator quits.
    ///
    /// # Errors
    ///
    /// Queue/library I/O failures, recorder failures and a closed terminal
    /// are fatal and end the loop.
    pub fn run(&mut self) -> Result<Exit> {
        let mut state = State::Idle;
        loop {
            debug!("State: {state:?}");
            state = match state {
                State::Idle => self.next_track()?,
                State::Searching(track) => self.search(track),
                State::Recording(track) => self.record(track)?,
                State::InterruptMenu(track) => self.recover(&track)?,
                State::Done(exit) => return Ok(exit),
            };
        }
    }

    #[must_use]
    pub fn library(&self) -> &Library {
        &self.library
    }

    fn next_track(&mut self) -> Result<State> {
        let Some(line) = self.queue.pop()? else {
            writeln!(self.output, "Queue is empty.")?;
            return Ok(State::Done(Exit::QueueEmpty));
        };

        let song = to_artist_title(&line);
        if self.library.contains(&song) {
            debug!("Skipping `{song}', already in library");
            return Ok(State::Idle);
        }
        if !is_song(&line) {
            debug!("Skipping `{line}', not a song");
            return Ok(State::Idle);
        }
        Ok(State::Searching(Track { line, song }))
    }

    fn search(&mut self, track: Track) -> State {
        if let Err(e) = self.search.search(&quoted(&track.song)) {
            warn!("Web search for `{}' failed: {e:#}", track.song);
        }
        State::Recording(track)
    }

    fn record(&mut self, track: Track) -> Result<State> {
        let path = song_path(&track.song, &self.music_dir);
        writeln!(self.output, "Recording {}", track.song)?;

        match self.recorder.record(&path)? {
            RecordOutcome::Completed => {
                self.library.add(&track.song)?;
                info!("Ripped `{}' to {}", track.song, path.display());
                Ok(State::Idle)
            }
            RecordOutcome::Interrupted => {
                remove_partial(&path)?;
                Ok(State::InterruptMenu(track))
            }
        }
    }

    /// Applies the operator's menu choices, each against the same
    /// interrupted `track`.
    fn recover(&mut self, track: &Track) -> Result<State> {
        let actions = menu::prompt_selection(&mut self.input, &mut self.output)?;

        for action in actions {
            debug!("Applying {action:?} to `{}'", track.song);
            match action {
                MenuAction::PopPrevious => match self.library.pop_previous()? {
                    Some(previous) => writeln!(self.output, "Removed `{previous}' from the library.")?,
                    None => writeln!(self.output, "Library is empty; nothing to pop.")?,
                },
                MenuAction::RequeueNext => self.queue.push_next(&track.line)?,
                MenuAction::RequeueLast => self.queue.push_last(&track.line)?,
                MenuAction::Quit => return Ok(State::Done(Exit::Quit)),
                MenuAction::Skip => self.library.add(&track.song)?,
            }
        }
        Ok(State::Idle)
    }
}

/// Deletes whatever the interrupted recorder left at `path`.
fn remove_partial(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed partial recording {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove partial recording {}", path.display())),
    }
}
