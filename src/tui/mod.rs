pub mod app;
pub mod event;
pub mod ticker;
pub mod ui;
pub mod views;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{Event, poll, read},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::engine::Clock;
use app::{App, Message, RunningState};

/// Upper bound on how long a single key poll blocks
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Main entry point for TUI mode
pub fn run_tui<C: Clock>(app: &mut App<C>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<C>,
) -> io::Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::draw(f, app))?;

        // Expiry: the red label is on screen, now block on the sound
        if app.alert_pending {
            app.ring_alarm();
            // Keys typed during playback must not dismiss the overlay
            while poll(Duration::ZERO)? {
                let _ = read()?;
            }
            continue;
        }
        app.arm_acknowledge();

        // Wait for a key, but never past the next tick
        let timeout = app
            .ticker
            .until_due(Instant::now())
            .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));
        if poll(timeout)? {
            if let Event::Key(key) = read()? {
                if let Some(msg) = event::handle_key(key, app) {
                    dispatch(app, msg);
                }
            }
        }

        // A stop key wins over a tick that became due meanwhile
        if app.running_state == RunningState::Done {
            return Ok(());
        }

        if app.ticker.take_due(Instant::now()) {
            dispatch(app, Message::Tick);
        }
    }
}

/// Process message and any follow-up messages
fn dispatch<C: Clock>(app: &mut App<C>, msg: Message) {
    let mut current_msg = Some(msg);
    while let Some(m) = current_msg {
        current_msg = app.update(m, Instant::now());
    }
}
