//! Expiry alert: play the sound to completion, then notify.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{error, info, warn};

use crate::engine::ExpiryReport;
use crate::error::AppError;
use crate::notification::{DesktopNotifier, Notifier};

#[cfg(target_os = "macos")]
const DEFAULT_PLAYER: &str = "afplay";
#[cfg(not(target_os = "macos"))]
const DEFAULT_PLAYER: &str = "paplay";

/// Plays an audio resource, blocking until playback ends or fails.
pub trait AlertPlayer {
    fn play(&self, path: &Path) -> Result<(), AppError>;
}

/// Runs an external player with the sound path as its last argument.
///
/// The player must stay in the foreground until playback ends (`afplay` and
/// `paplay` do); `play` returns when the process exits.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    cmd: Vec<String>,
}

impl CommandPlayer {
    pub fn new(cmd: Option<Vec<String>>) -> Self {
        Self {
            cmd: cmd.unwrap_or_else(|| vec![DEFAULT_PLAYER.to_string()]),
        }
    }
}

impl AlertPlayer for CommandPlayer {
    fn play(&self, path: &Path) -> Result<(), AppError> {
        if !path.is_file() {
            return Err(AppError::Audio(format!(
                "sound file {} not found",
                path.display()
            )));
        }
        let (program, args) = self
            .cmd
            .split_first()
            .ok_or_else(|| AppError::Config("PlayerCommand empty".into()))?;
        info!(program=%program, args=?args, path=%path.display(), "playing alert sound");
        let status = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AppError::Audio(format!("cannot run {program}: {e}")))?;
        if !status.success() {
            return Err(AppError::Audio(format!(
                "{program} failed with status {status}"
            )));
        }
        Ok(())
    }
}

/// The terminal alert. Failures are logged and never stop the sequence.
pub struct Alarm {
    sound: PathBuf,
    player: Box<dyn AlertPlayer>,
    notifier: Box<dyn Notifier>,
}

impl Alarm {
    pub fn new(sound: PathBuf, player: Box<dyn AlertPlayer>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            sound,
            player,
            notifier,
        }
    }

    pub fn system(sound: PathBuf, player_cmd: Option<Vec<String>>) -> Self {
        Self::new(
            sound,
            Box::new(CommandPlayer::new(player_cmd)),
            Box::new(DesktopNotifier),
        )
    }

    pub fn ring(&self, report: &ExpiryReport) {
        if let Err(e) = self.player.play(&self.sound) {
            error!(error=%e, "alert sound failed");
        }
        if let Err(e) = self.notifier.notify(report) {
            warn!(error=%e, "desktop notification failed");
        }
    }
}

impl std::fmt::Debug for Alarm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alarm").field("sound", &self.sound).finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::Local;

    use super::*;

    /// Records every call and optionally fails
    #[derive(Debug, Clone, Default)]
    pub(crate) struct Recorder {
        pub(crate) calls: Rc<RefCell<Vec<String>>>,
        pub(crate) fail: bool,
    }

    impl AlertPlayer for Recorder {
        fn play(&self, path: &Path) -> Result<(), AppError> {
            self.calls.borrow_mut().push(format!("play {}", path.display()));
            if self.fail {
                return Err(AppError::Audio("boom".into()));
            }
            Ok(())
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, _report: &ExpiryReport) -> Result<(), AppError> {
            self.calls.borrow_mut().push("notify".into());
            Ok(())
        }
    }

    fn report() -> ExpiryReport {
        let now = Local::now();
        ExpiryReport {
            started: now,
            expired: now,
        }
    }

    #[test]
    fn test_ring_plays_then_notifies() {
        let rec = Recorder::default();
        let alarm = Alarm::new("ding.wav".into(), Box::new(rec.clone()), Box::new(rec.clone()));
        alarm.ring(&report());
        assert_eq!(*rec.calls.borrow(), vec!["play ding.wav", "notify"]);
    }

    #[test]
    fn test_audio_failure_still_notifies() {
        let player = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let notifier = Recorder {
            calls: Rc::clone(&player.calls),
            fail: false,
        };
        let alarm = Alarm::new("ding.wav".into(), Box::new(player.clone()), Box::new(notifier));
        alarm.ring(&report());
        assert_eq!(*player.calls.borrow(), vec!["play ding.wav", "notify"]);
    }

    #[test]
    fn test_command_player_missing_file() {
        let player = CommandPlayer::new(None);
        let err = player
            .play(Path::new("/definitely/not/here.wav"))
            .unwrap_err();
        assert!(matches!(err, AppError::Audio(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_player_runs_override() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(CommandPlayer::new(Some(vec!["true".into()])).play(file.path()).is_ok());
        assert!(matches!(
            CommandPlayer::new(Some(vec!["false".into()])).play(file.path()),
            Err(AppError::Audio(_))
        ));
    }
}
