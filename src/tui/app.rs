use std::time::Instant;

use tracing::info;

use crate::alert::Alarm;
use crate::engine::{Clock, Engine, ExpiryReport, SystemClock, Tick, format_label};
use crate::models::Settings;
use crate::tui::ticker::Ticker;

/// Running state of the application
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunningState {
    #[default]
    Running,
    Done,
}

/// All possible application messages/events
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Countdown actions
    TogglePause,
    AddTime,
    SubtractTime,
    Stop,

    // Expiry
    Expire(ExpiryReport),
    Acknowledge,

    // UI
    ToggleCompact,
    ToggleHelp,
    Tick,
}

/// Main application state
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    pub running_state: RunningState,
    pub engine: Engine<C>,
    pub ticker: Ticker,
    alarm: Alarm,

    // Display state
    pub label: String,
    pub time_delta: u32,
    pub step_in_minutes: u32,
    pub compact: bool,
    pub show_help: bool,
    pub status_message: Option<String>,

    // Set once the countdown ran out
    pub expiry: Option<ExpiryReport>,
    pub alert_pending: bool,
    ack_armed: bool,
}

impl<C: Clock> App<C> {
    pub fn new(engine: Engine<C>, settings: &Settings, alarm: Alarm, now: Instant) -> Self {
        let label = engine.label();
        Self {
            running_state: RunningState::Running,
            engine,
            ticker: Ticker::new(settings.tick_interval(), now),
            alarm,
            label,
            time_delta: settings.time_delta,
            step_in_minutes: settings.step_in_minutes,
            compact: false,
            show_help: false,
            status_message: None,
            expiry: None,
            alert_pending: false,
            ack_armed: false,
        }
    }

    /// The alarm has finished and the "time is up" overlay is up
    pub fn overlay_visible(&self) -> bool {
        self.expiry.is_some() && !self.alert_pending
    }

    /// Only keys read after the overlay was drawn may dismiss it.
    pub fn arm_acknowledge(&mut self) {
        if self.overlay_visible() {
            self.ack_armed = true;
        }
    }

    /// Waiting for the user to dismiss the "time is up" overlay
    pub fn awaiting_ack(&self) -> bool {
        self.overlay_visible() && self.ack_armed
    }

    /// Core update function
    pub fn update(&mut self, msg: Message, now: Instant) -> Option<Message> {
        match msg {
            Message::TogglePause => {
                if self.expiry.is_some() {
                    return None;
                }
                if self.engine.pause_resume() {
                    self.ticker.start(now);
                    self.status_message = Some("Resumed".to_string());
                } else {
                    self.ticker.stop();
                    self.status_message = Some("Paused".to_string());
                }
                self.refresh_label();
                None
            }
            Message::AddTime => {
                self.engine.adjust(i64::from(self.time_delta));
                self.status_message = Some(format!("+{} min", self.time_delta));
                self.refresh_label();
                None
            }
            Message::SubtractTime => {
                self.engine.adjust(-i64::from(self.time_delta));
                self.status_message = Some(format!("-{} min", self.time_delta));
                self.refresh_label();
                None
            }
            Message::Stop => {
                self.engine.stop();
                self.ticker.stop();
                self.running_state = RunningState::Done;
                None
            }
            Message::Tick => match self.engine.on_tick() {
                Tick::Running(remaining) => {
                    self.label = format_label(remaining, true);
                    None
                }
                Tick::Expired(report) => Some(Message::Expire(report)),
                Tick::Paused | Tick::Finished => None,
            },
            Message::Expire(report) => {
                self.ticker.stop();
                self.expiry = Some(report);
                self.alert_pending = true;
                self.show_help = false;
                self.status_message = Some("Time is up".to_string());
                self.refresh_label();
                None
            }
            Message::Acknowledge => {
                if self.awaiting_ack() {
                    info!("expiry acknowledged");
                    self.running_state = RunningState::Done;
                }
                None
            }
            Message::ToggleCompact => {
                self.compact = !self.compact;
                None
            }
            Message::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
        }
    }

    /// Play the alert and send the notification. Blocks until playback ends.
    pub fn ring_alarm(&mut self) {
        if !self.alert_pending {
            return;
        }
        if let Some(report) = &self.expiry {
            self.alarm.ring(report);
        }
        self.alert_pending = false;
    }

    fn refresh_label(&mut self) {
        self.label = self.engine.label();
    }
}
