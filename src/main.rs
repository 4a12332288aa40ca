use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

mod alert;
mod cli;
mod config;
mod engine;
mod error;
mod models;
mod notification;
mod tui;

use alert::Alarm;
use cli::{Cli, Commands};
use config::ConfigSource;
use engine::{Engine, SystemClock};
use error::AppError;
use models::Settings;
use tui::app::App;

/// The terminal belongs to the UI, so logs go to a daily file.
fn init_tracing(verbose: bool) -> WorkerGuard {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    let dir = config::log_dir();
    let (writer, guard) = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("stint")
        .filename_suffix("log")
        .build(&dir)
    {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(e) => {
            eprintln!("logging disabled, cannot write to {}: {e}", dir.display());
            tracing_appender::non_blocking(std::io::sink())
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    guard
}

fn effective_settings(cli: &Cli, source: &ConfigSource) -> Result<Settings, AppError> {
    let settings = config::load_from_source(source)?;
    Ok(config::apply_overrides(settings, &cli.overrides))
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let source = config::resolve_config_path(cli.config.clone())?;

    match &cli.command {
        Some(Commands::Init { force }) => {
            let path = source.path();
            if path.exists() && !force {
                return Err(AppError::Config(format!(
                    "{} already exists, pass --force to overwrite",
                    path.display()
                )));
            }
            let settings = config::apply_overrides(Settings::default(), &cli.overrides);
            settings.validate()?;
            config::save_config(path, &settings)?;
            println!("Wrote {}", path.display());
            return Ok(());
        }
        Some(Commands::Config) => {
            let settings = effective_settings(&cli, &source)?;
            settings.validate()?;
            println!("Config file: {}", source.path().display());
            println!("{}", settings.format_status());
            return Ok(());
        }
        None => {}
    }

    let _guard = init_tracing(cli.verbose);

    // Fail before the terminal is taken over
    let settings = effective_settings(&cli, &source)
        .and_then(|s| s.validate().map(|_| s))
        .inspect_err(|e| error!(error=%e, "invalid configuration"))?;
    info!(path=%source.path().display(), "loaded config");

    let engine = Engine::initialize(&settings, SystemClock)?;
    let alarm = Alarm::system(
        settings.alert_sound_path.clone(),
        settings.player_command.clone(),
    );
    let mut app = App::new(engine, &settings, alarm, Instant::now());

    tui::run_tui(&mut app)?;

    info!("exiting");
    Ok(())
}
