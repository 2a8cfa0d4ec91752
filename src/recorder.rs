//! # Recorder Adapter
//!
//! Captures one song by running a SoX `rec` process that trims leading
//! silence, starts on the first sound and stops after a stretch of
//! trailing silence. The call blocks until `rec` exits.
//!
//! Ctrl-C reaches both `rec` and this process (same foreground process
//! group). While a recording runs, SIGINT is caught instead of killing
//! us, so the caller can offer the recovery menu.

use crate::config::RuntimeConfig;
use crate::error::RipError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use self::sigint::SigintGuard;

/// How a recording ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The recorder stopped on its own after trailing silence.
    Completed,
    /// The operator pressed Ctrl-C; the output file may be partial.
    Interrupted,
}

/// Something that records audio to a file.
pub trait Recorder {
    /// Records into `path`, blocking until done or interrupted.
    ///
    /// # Errors
    ///
    /// A recorder that cannot start, or exits abnormally without an
    /// interrupt, is an error.
    fn record(&mut self, path: &Path) -> Result<RecordOutcome>;
}

impl<T: Recorder + ?Sized> Recorder for &mut T {
    fn record(&mut self, path: &Path) -> Result<RecordOutcome> {
        (**self).record(path)
    }
}

/// [`Recorder`] backed by SoX's `rec`.
#[derive(Debug, Clone)]
pub struct SoxRecorder {
    program: String,
    compression: f64,
    leading_silence: String,
    trailing_silence: String,
    silence_threshold: String,
}

impl SoxRecorder {
    #[must_use]
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            program: config.recorder_program.clone(),
            compression: config.compression,
            leading_silence: config.leading_silence.clone(),
            trailing_silence: config.trailing_silence.clone(),
            silence_threshold: config.silence_threshold.clone(),
        }
    }

    /// Command-line arguments for recording into `path`.
    ///
    /// `-C` sets the MP3 compression factor; the `silence` effect starts
    /// after one period of sound following `leading_silence` and stops
    /// after `trailing_silence` below `silence_threshold`.
    #[must_use]
    pub fn args(&self, path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-C".into(), format!("{:.1}", self.compression).into()];
        args.push(path.as_os_str().to_owned());
        args.extend(
            [
                "silence",
                "1",
                self.leading_silence.as_str(),
                self.silence_threshold.as_str(),
                "1",
                self.trailing_silence.as_str(),
                self.silence_threshold.as_str(),
            ]
            .into_iter()
            .map(OsString::from),
        );
        args
    }
}

impl Recorder for SoxRecorder {
    fn record(&mut self, path: &Path) -> Result<RecordOutcome> {
        let guard = SigintGuard::install().context("Failed to install interrupt handler")?;

        debug!("Running {} {:?}", self.program, self.args(path));
        let status = Command::new(&self.program)
            .args(self.args(path))
            .status()
            .with_context(|| format!("Failed to start recorder `{}`", self.program))?;

        // `rec` exits 0 when Ctrl-C stops it, so the flag decides.
        if guard.interrupted() {
            info!("Recording of {} interrupted", path.display());
            return Ok(RecordOutcome::Interrupted);
        }
        if !status.success() {
            return Err(RipError::RecorderFailure { program: self.program.clone(), status }.into());
        }

        info!("Recorded {}", path.display());
        Ok(RecordOutcome::Completed)
    }
}

#[cfg(unix)]
mod sigint {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};

    static INTERRUPTED: AtomicBool = AtomicBool::new(false);

    extern "C" fn on_sigint(_signum: libc::c_int) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }

    /// Catches SIGINT for as long as it lives, then restores the previous
    /// disposition.
    pub(crate) struct SigintGuard {
        previous: libc::sighandler_t,
    }

    impl SigintGuard {
        pub(crate) fn install() -> io::Result<Self> {
            INTERRUPTED.store(false, Ordering::SeqCst);
            // SAFETY: the handler only stores to an atomic, which is
            // async-signal-safe.
            let previous = unsafe { libc::signal(libc::SIGINT, on_sigint as libc::sighandler_t) };
            if previous == libc::SIG_ERR {
                return Err(io::Error::last_os_error());
            }
            Ok(Self { previous })
        }

        pub(crate) fn interrupted(&self) -> bool {
            INTERRUPTED.load(Ordering::SeqCst)
        }
    }

    impl Drop for SigintGuard {
        fn drop(&mut self) {
            // SAFETY: `previous` came from `signal` for the same signal.
            unsafe {
                libc::signal(libc::SIGINT, self.previous);
            }
        }
    }
}

#[cfg(not(unix))]
mod sigint {
    use std::io;

    /// Without POSIX signals Ctrl-C terminates the process as usual.
    pub(crate) struct SigintGuard;

    impl SigintGuard {
        pub(crate) fn install() -> io::Result<Self> {
            Ok(Self)
        }

        pub(crate) fn interrupted(&self) -> bool {
            false
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // SIGINT disposition is process-wide.
    static SIGNAL_LOCK: Mutex<()> = Mutex::new(());

    fn recorder(program: &str) -> SoxRecorder {
        SoxRecorder::new(&RuntimeConfig {
            recorder_program: program.to_string(),
            ..RuntimeConfig::default()
        })
    }

    #[test]
    fn test_default_args() {
        let args = recorder("rec").args(Path::new("/music/foo - bar.mp3"));
        let expected: Vec<OsString> = [
            "-C", "-4.0", "/music/foo - bar.mp3", "silence", "1", "0t", "0%", "1", "3t", "0%",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_compression_from_config() {
        let config: RuntimeConfig = serde_json::from_str(r#"{ "compression": -2.0 }"#).unwrap();
        let args = SoxRecorder::new(&config).args(Path::new("/m/a.mp3"));
        assert_eq!(args[..2], [OsString::from("-C"), OsString::from("-2.0")]);
    }

    #[test]
    fn test_successful_exit_completes() {
        let _lock = SIGNAL_LOCK.lock().unwrap();
        let outcome = recorder("true").record(Path::new("/tmp/unused.mp3")).unwrap();
        assert_eq!(outcome, RecordOutcome::Completed);
    }

    #[test]
    fn test_failed_exit_is_recorder_failure() {
        let _lock = SIGNAL_LOCK.lock().unwrap();
        let err = recorder("false").record(Path::new("/tmp/unused.mp3")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RipError>(),
            Some(RipError::RecorderFailure { .. })
        ));
    }

    #[test]
    fn test_missing_program_is_error() {
        let _lock = SIGNAL_LOCK.lock().unwrap();
        assert!(recorder("songripper-no-such-recorder")
            .record(Path::new("/tmp/unused.mp3"))
            .is_err());
    }

    #[test]
    fn test_guard_observes_sigint() {
        let _lock = SIGNAL_LOCK.lock().unwrap();
        let guard = SigintGuard::install().unwrap();
        assert!(!guard.interrupted());
        // SAFETY: the guard's handler is installed.
        unsafe {
            libc::raise(libc::SIGINT);
        }
        assert!(guard.interrupted());
    }
}
