//! # Integration Tests for SongRipper
//!
//! End-to-end runs of the ripping loop over real queue and library files,
//! plus smoke tests of the binary's command line.

use anyhow::Result;
use songripper::library::Library;
use songripper::queue::Queue;
use songripper::recorder::{RecordOutcome, Recorder};
use songripper::ripper::{Exit, Ripper};
use songripper::search::WebSearch;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Writes an empty file where the recording would go and reports success.
#[derive(Default)]
struct TouchRecorder {
    paths: Vec<PathBuf>,
}

impl Recorder for TouchRecorder {
    fn record(&mut self, path: &Path) -> Result<RecordOutcome> {
        fs::write(path, b"")?;
        self.paths.push(path.to_path_buf());
        Ok(RecordOutcome::Completed)
    }
}

struct OfflineSearch;

impl WebSearch for OfflineSearch {
    fn search(&mut self, _terms: &str) -> Result<()> {
        anyhow::bail!("offline")
    }
}

/// Test helper to create data files and a music directory
fn create_workspace(queue: &str, library: &str) -> Result<(TempDir, PathBuf, PathBuf, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let queue_path = temp_dir.path().join("queue");
    let library_path = temp_dir.path().join("library");
    let music_dir = temp_dir.path().join("my music");
    fs::write(&queue_path, queue)?;
    fs::write(&library_path, library)?;
    fs::create_dir(&music_dir)?;
    Ok((temp_dir, queue_path, library_path, music_dir))
}

#[cfg(test)]
mod ripping_tests {
    use super::*;

    #[test]
    fn test_credit_line_is_filtered_and_song_recorded() -> Result<()> {
        let (_tmp, queue_path, library_path, music_dir) =
            create_workspace("Portishead (2)* – Roads\nLyrics By – Beth Gibbons\n", "")?;

        let mut ripper = Ripper::new(
            Queue::open(&queue_path)?,
            Library::open(&library_path)?,
            music_dir.clone(),
            TouchRecorder::default(),
            OfflineSearch,
            Cursor::new(Vec::<u8>::new()),
            Vec::<u8>::new(),
        );

        assert_eq!(ripper.run()?, Exit::QueueEmpty);
        drop(ripper);

        assert_eq!(fs::read_to_string(&library_path)?, "Portishead - Roads\n");
        assert_eq!(fs::read_to_string(&queue_path)?, "");
        assert!(music_dir.join("Portishead - Roads.mp3").exists());
        Ok(())
    }

    #[test]
    fn test_second_run_records_nothing_new() -> Result<()> {
        let (_tmp, queue_path, library_path, music_dir) =
            create_workspace("Burial – Archangel\nBurial – Archangel\n", "")?;

        let mut recorder = TouchRecorder::default();
        {
            let mut ripper = Ripper::new(
                Queue::open(&queue_path)?,
                Library::open(&library_path)?,
                music_dir.clone(),
                &mut recorder,
                OfflineSearch,
                Cursor::new(Vec::<u8>::new()),
                Vec::<u8>::new(),
            );
            ripper.run()?;
        }

        assert_eq!(recorder.paths.len(), 1);
        assert_eq!(fs::read_to_string(&library_path)?, "Burial - Archangel\n");
        Ok(())
    }

    #[test]
    fn test_empty_queue_stops_immediately() -> Result<()> {
        let (_tmp, queue_path, library_path, music_dir) = create_workspace("\n\n", "a - b\n")?;

        let mut ripper = Ripper::new(
            Queue::open(&queue_path)?,
            Library::open(&library_path)?,
            music_dir,
            TouchRecorder::default(),
            OfflineSearch,
            Cursor::new(Vec::<u8>::new()),
            Vec::<u8>::new(),
        );

        assert_eq!(ripper.run()?, Exit::QueueEmpty);
        assert_eq!(ripper.library().len(), 1);
        Ok(())
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = Command::new(env!("CARGO_BIN_EXE_songripper"))
            .arg("--help")
            .output()
            .expect("Failed to run help command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("songripper"));
        assert!(stdout.contains("MUSIC_DIRECTORY"));
    }

    #[test]
    fn test_cli_requires_music_directory() {
        let output = Command::new(env!("CARGO_BIN_EXE_songripper"))
            .output()
            .expect("Failed to run songripper");

        assert!(!output.status.success());
    }
}
