//! Countdown engine: owns the end instant and the pause/adjust/expire transitions.
//!
//! Remaining time is always derived from `end - now`; nothing counts down in
//! the background. The host drives [`Engine::on_tick`] and reacts to
//! [`Tick::Expired`], which is returned at most once per engine.

use chrono::{DateTime, Duration, Local};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::Settings;

/// Source of wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// What a single tick observed
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Counting down; carries the fresh remaining time
    Running(Duration),
    /// Engine is paused, nothing checked
    Paused,
    /// The countdown just ran out
    Expired(ExpiryReport),
    /// Already expired or stopped
    Finished,
}

/// Summary handed to the expiry action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiryReport {
    pub started: DateTime<Local>,
    pub expired: DateTime<Local>,
}

impl ExpiryReport {
    /// Text for the acknowledgment surface, e.g. "Relax now, job is done.\n09.00-17:00"
    pub fn message(&self) -> String {
        format!(
            "Relax now, job is done.\n{}-{}",
            self.started.format("%H.%M"),
            self.expired.format("%H:%M")
        )
    }
}

#[derive(Debug)]
pub struct Engine<C: Clock = SystemClock> {
    clock: C,
    start: DateTime<Local>,
    end: DateTime<Local>,
    enabled: bool,
    expired: bool,
    stopped: bool,
}

impl<C: Clock> Engine<C> {
    /// Start counting down `total` from the clock's current instant.
    pub fn new(total: Duration, clock: C) -> Self {
        let start = clock.now();
        info!("Started at {}", start.format("%H:%M"));
        Self {
            clock,
            start,
            end: start + total,
            enabled: true,
            expired: false,
            stopped: false,
        }
    }

    /// Build an engine from loaded settings; fails if `TotalTime` does not parse.
    pub fn initialize(settings: &Settings, clock: C) -> Result<Self, AppError> {
        let total = settings.total_duration()?;
        debug!(total = %total, "prepared end time");
        Ok(Self::new(total, clock))
    }

    pub fn on_tick(&mut self) -> Tick {
        if self.expired || self.stopped {
            return Tick::Finished;
        }
        if !self.enabled {
            return Tick::Paused;
        }
        let now = self.clock.now();
        if now >= self.end {
            self.expired = true;
            info!("Expired at {}", now.format("%H:%M"));
            return Tick::Expired(ExpiryReport {
                started: self.start,
                expired: now,
            });
        }
        Tick::Running(self.end - now)
    }

    /// Toggle between counting and paused. The end instant does not move, so
    /// the paused interval still counts against the remaining time.
    pub fn pause_resume(&mut self) -> bool {
        if self.expired || self.stopped {
            return self.enabled;
        }
        self.enabled = !self.enabled;
        info!(
            "{} at {}",
            if self.enabled { "Resumed" } else { "Paused" },
            self.clock.now().format("%H:%M")
        );
        self.enabled
    }

    /// Shift the end instant by a signed number of minutes. The end may move
    /// into the past; the next tick then expires.
    pub fn adjust(&mut self, delta_minutes: i64) {
        if self.expired || self.stopped {
            return;
        }
        self.end += Duration::minutes(delta_minutes);
        debug!(delta_minutes, end = %self.end.format("%H:%M:%S"), "adjusted end time");
    }

    /// Time left until expiry; negative once the end instant has passed.
    pub fn remaining(&self) -> Duration {
        self.end - self.clock.now()
    }

    /// Manual exit: no alert, and any later tick is a no-op.
    pub fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            info!("Stopped by exit at {}", self.clock.now().format("%H:%M"));
        }
    }

    pub fn label(&self) -> String {
        format_label(self.remaining(), self.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn start_instant(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end_instant(&self) -> DateTime<Local> {
        self.end
    }
}

/// `HH:MM`, truncated toward zero and clamped at `00:00`.
pub fn format_remaining(remaining: Duration) -> String {
    let minutes = remaining.num_minutes().max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Remaining time with the pause marker around it when paused.
pub fn format_label(remaining: Duration, enabled: bool) -> String {
    let sep = if enabled { "" } else { " || " };
    format!("{sep}{}{sep}", format_remaining(remaining))
}
