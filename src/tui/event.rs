use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Message};
use crate::engine::Clock;

/// Map key events to messages based on current app state
pub fn handle_key<C: Clock>(key: KeyEvent, app: &App<C>) -> Option<Message> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // The alarm is playing; nothing to do until it finishes
    if app.alert_pending {
        return None;
    }

    // Any key dismisses the "time is up" overlay, once it has been drawn
    if app.overlay_visible() {
        return app.awaiting_ack().then_some(Message::Acknowledge);
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Message::Stop);
    }

    // If help is shown, any key closes it
    if app.show_help {
        return Some(Message::ToggleHelp);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Stop),
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(Message::TogglePause)
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('k') | KeyCode::Up => {
            Some(Message::AddTime)
        }
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Char('j') | KeyCode::Down => {
            Some(Message::SubtractTime)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Message::ToggleCompact),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::alert::Alarm;
    use crate::alert::tests::Recorder;
    use crate::engine::Engine;
    use crate::engine::tests::ManualClock;
    use crate::models::Settings;

    fn app(total: &str) -> App<ManualClock> {
        let settings = Settings {
            total_time: total.to_string(),
            ..Settings::default()
        };
        let engine = Engine::initialize(&settings, ManualClock::new()).unwrap();
        let rec = Recorder::default();
        let alarm = Alarm::new("a.wav".into(), Box::new(rec.clone()), Box::new(rec));
        App::new(engine, &settings, alarm, Instant::now())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_countdown_keys() {
        let app = app("01:00:00");
        assert_eq!(handle_key(press(KeyCode::Char(' ')), &app), Some(Message::TogglePause));
        assert_eq!(handle_key(press(KeyCode::Char('+')), &app), Some(Message::AddTime));
        assert_eq!(handle_key(press(KeyCode::Down), &app), Some(Message::SubtractTime));
        assert_eq!(handle_key(press(KeyCode::Char('m')), &app), Some(Message::ToggleCompact));
        assert_eq!(handle_key(press(KeyCode::Esc), &app), Some(Message::Stop));
        assert_eq!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Some(Message::Stop)
        );
        assert_eq!(handle_key(press(KeyCode::Char('x')), &app), None);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app("01:00:00");
        app.show_help = true;
        assert_eq!(handle_key(press(KeyCode::Char('q')), &app), Some(Message::ToggleHelp));
    }

    #[test]
    fn test_any_key_acknowledges_after_alarm() {
        let mut app = app("00:00:00");
        let now = Instant::now();
        let follow = app.update(Message::Tick, now).unwrap();
        app.update(follow, now);
        assert_eq!(handle_key(press(KeyCode::Char('x')), &app), None);
        app.ring_alarm();
        // typed while the sound played, overlay not drawn yet
        assert_eq!(handle_key(press(KeyCode::Char(' ')), &app), None);
        app.arm_acknowledge();
        assert_eq!(handle_key(press(KeyCode::Char('x')), &app), Some(Message::Acknowledge));
        assert_eq!(handle_key(press(KeyCode::Char('q')), &app), Some(Message::Acknowledge));
    }
}
