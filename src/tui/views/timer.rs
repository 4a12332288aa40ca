use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::engine::Clock;
use crate::tui::app::App;

fn label_style<C: Clock>(app: &App<C>) -> Style {
    let color = if app.engine.is_expired() {
        Color::Red
    } else if app.engine.is_enabled() {
        Color::Cyan
    } else {
        Color::Yellow
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn draw_timer<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Spacer
            Constraint::Length(11), // Countdown display
            Constraint::Min(0),     // Rest
        ])
        .split(area);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);

    let engine = &app.engine;
    let state = if engine.is_expired() {
        Span::styled("DONE", Style::default().fg(Color::Red))
    } else if engine.is_enabled() {
        Span::styled("RUNNING", Style::default().fg(Color::Green))
    } else {
        Span::styled("PAUSED", Style::default().fg(Color::Yellow))
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(app.label.clone(), label_style(app))).alignment(Alignment::Center),
        Line::from(""),
        Line::from(vec![Span::raw("  State:   "), state]),
        Line::from(vec![
            Span::raw("  Started: "),
            Span::styled(
                engine.start_instant().format("%H:%M").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Ends:    "),
            Span::styled(
                engine.end_instant().format("%H:%M").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  Refresh every {} min, [+/-] adjusts by {} min",
                app.step_in_minutes, app.time_delta
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let border = if engine.is_expired() {
        Color::Red
    } else {
        Color::White
    };

    let timer_block = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Remaining ")
            .style(Style::default().fg(border)),
    );

    frame.render_widget(timer_block, inner[1]);
}

/// Minimized view: the label alone
pub fn draw_compact<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let label = Paragraph::new(Line::from(Span::styled(app.label.clone(), label_style(app))))
        .alignment(Alignment::Center);
    frame.render_widget(label, chunks[1]);
}
