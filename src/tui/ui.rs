use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::views::{draw_compact, draw_timer};
use crate::engine::Clock;

/// Main draw function
pub fn draw<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();
    if app.compact {
        draw_compact(frame, app, area);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Main content
                Constraint::Length(3), // Status/help bar
            ])
            .split(area);

        draw_header(frame, chunks[0]);
        draw_timer(frame, app, chunks[1]);
        draw_footer(frame, app, chunks[2]);
    }

    if app.show_help {
        draw_help_overlay(frame);
    }

    if app.overlay_visible() {
        draw_expiry_overlay(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        " Countdown ",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title(" STINT "))
    .style(Style::default().fg(Color::White));

    frame.render_widget(header, area);
}

fn draw_footer<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let help_text = if app.engine.is_expired() {
        "Time is up"
    } else if app.engine.is_enabled() {
        "[space] Pause  [+/-] Adjust  [m] Minimize  [?] Help  [q] Exit"
    } else {
        "[space] Start  [+/-] Adjust  [m] Minimize  [?] Help  [q] Exit"
    };

    let status = if let Some(msg) = &app.status_message {
        Line::from(vec![
            Span::styled(msg, Style::default().fg(Color::Green)),
            Span::raw("  |  "),
            Span::styled(help_text, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::DarkGray),
        ))
    };

    let footer = Paragraph::new(status).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help_text = vec![
        Line::from(Span::styled(
            "STINT - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  space/p  - Pause or resume"),
        Line::from("  +/k/Up   - Add time"),
        Line::from("  -/j/Down - Remove time"),
        Line::from("  m        - Minimize/restore"),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q/Esc    - Exit without alarm"),
        Line::from(""),
        Line::from("  Pausing does not move the end time."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn draw_expiry_overlay<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let Some(report) = &app.expiry else {
        return;
    };
    let area = centered_rect(50, 40, frame.area());

    let mut text = vec![Line::from("")];
    text.extend(report.message().lines().map(|l| {
        Line::from(Span::styled(
            l.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    }));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key to exit",
        Style::default().fg(Color::DarkGray),
    )));

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" stint ")
                .style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::alert::Alarm;
    use crate::alert::tests::Recorder;
    use crate::engine::Engine;
    use crate::engine::tests::ManualClock;
    use crate::models::Settings;
    use crate::tui::app::Message;

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

    fn render(app: &App<ManualClock>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_label_and_pause_marker() {
        let mut app = app("02:05:00");
        assert!(render(&app).contains("02:05"));
        app.update(Message::TogglePause, Instant::now());
        assert!(render(&app).contains("|| 02:05 ||"));
    }

    #[test]
    fn test_compact_shows_only_label() {
        let mut app = app("00:59:00");
        app.update(Message::ToggleCompact, Instant::now());
        let screen = render(&app);
        assert!(screen.contains("00:59"));
        assert!(!screen.contains("STINT"));
    }

    #[test]
    fn test_expired_engine_drives_done_state() {
        let mut app = app("00:00:00");
        // the Expire follow-up has not been dispatched yet
        assert!(app.update(Message::Tick, Instant::now()).is_some());
        assert!(app.expiry.is_none());
        let screen = render(&app);
        assert!(screen.contains("DONE"));
        assert!(screen.contains("Time is up"));
        assert!(!screen.contains("Relax now"));
    }

    #[test]
    fn test_expiry_overlay() {
        let mut app = app("00:00:00");
        let now = Instant::now();
        if let Some(follow) = app.update(Message::Tick, now) {
            app.update(follow, now);
        }
        app.ring_alarm();
        // drawn before arming, like the event loop
        assert!(!app.awaiting_ack());
        let screen = render(&app);
        assert!(screen.contains("Relax now, job is done."));
        assert!(screen.contains("09.00-09:00"));
    }
}
