use std::path::PathBuf;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest day count accepted in `TotalTime`
const MAX_DAYS: u64 = 10_675_199;

/// Timer settings as stored in the YAML config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub total_time: String,      // span, e.g. "08:00:00"
    pub step_in_minutes: u32,    // tick interval
    pub time_delta: u32,         // minutes per +/- action
    pub alert_sound_path: PathBuf,
    /// Optional override for the audio player. Example: ["aplay", "-q"]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_command: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_time: "08:00:00".to_string(),
            step_in_minutes: 1,
            time_delta: 15,
            alert_sound_path: PathBuf::from("alert.wav"),
            player_command: None,
        }
    }
}

impl Settings {
    /// Check every field and return the parsed countdown length.
    pub fn validate(&self) -> Result<Duration, AppError> {
        if self.step_in_minutes == 0 {
            return Err(AppError::Config("StepInMinutes must be positive".into()));
        }
        if self.time_delta == 0 {
            return Err(AppError::Config("TimeDelta must be positive".into()));
        }
        if let Some(cmd) = &self.player_command
            && cmd.is_empty()
        {
            return Err(AppError::Config("PlayerCommand is empty".into()));
        }
        self.total_duration()
    }

    pub fn total_duration(&self) -> Result<Duration, AppError> {
        parse_span(&self.total_time)
    }

    /// Period of the display/expiry check
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.step_in_minutes) * 60)
    }

    /// Format settings for display
    pub fn format_status(&self) -> String {
        let player = match &self.player_command {
            Some(cmd) => cmd.join(" "),
            None => "(platform default)".to_string(),
        };
        format!(
            "TotalTime:      {}\nStepInMinutes:  {}\nTimeDelta:      {}\nAlertSoundPath: {}\nPlayerCommand:  {}",
            self.total_time,
            self.step_in_minutes,
            self.time_delta,
            self.alert_sound_path.display(),
            player
        )
    }
}

/// Parse a non-negative span written as `[d.]hh:mm[:ss[.fffffff]]` or a bare
/// day count `d`.
pub fn parse_span(input: &str) -> Result<Duration, AppError> {
    let invalid = || {
        AppError::Config(format!(
            "invalid TotalTime {input:?}, expected [d.]hh:mm[:ss]"
        ))
    };
    let s = input.trim();

    let Some((head, rest)) = s.split_once(':') else {
        let days = number(s, MAX_DAYS).ok_or_else(invalid)?;
        return Ok(Duration::days(days as i64));
    };

    let (days, hours) = match head.split_once('.') {
        Some((d, h)) => (number(d, MAX_DAYS), number(h, 23)),
        None => (Some(0), number(head, 23)),
    };
    let days = days.ok_or_else(invalid)?;
    let hours = hours.ok_or_else(invalid)?;

    let (minutes, seconds, nanos) = match rest.split_once(':') {
        None => (number(rest, 59).ok_or_else(invalid)?, 0, 0),
        Some((m, sec)) => {
            let minutes = number(m, 59).ok_or_else(invalid)?;
            let (whole, frac) = match sec.split_once('.') {
                Some((w, f)) => (w, Some(f)),
                None => (sec, None),
            };
            let seconds = number(whole, 59).ok_or_else(invalid)?;
            let nanos = match frac {
                Some(f) => fraction_nanos(f).ok_or_else(invalid)?,
                None => 0,
            };
            (minutes, seconds, nanos)
        }
    };

    Ok(Duration::days(days as i64)
        + Duration::hours(hours as i64)
        + Duration::minutes(minutes as i64)
        + Duration::seconds(seconds as i64)
        + Duration::nanoseconds(nanos))
}

fn number(field: &str, max: u64) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u64>().ok().filter(|v| *v <= max)
}

// Up to seven fractional digits (ticks of 100ns)
fn fraction_nanos(field: &str) -> Option<i64> {
    if field.is_empty() || field.len() > 7 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{field:0<9}");
    padded.parse::<i64>().ok()
}
