use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

const HELP_EPILOG: &str = r#"Config resolution order:
  1) --config/-c PATH
  2) $STINT_CONFIG
  3) platform default, e.g. ~/.config/stint/config.yaml
"#;

#[derive(Debug, Parser)]
#[command(
    name = "stint",
    version,
    about = "Terminal countdown timer that rings when the work stint is over",
    long_about = None,
    after_long_help = HELP_EPILOG,
)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Optional subcommand. Without one, runs the countdown.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Values that replace the ones read from the config file
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Countdown length, e.g. 08:00:00
    #[arg(short, long, global = true)]
    pub total: Option<String>,

    /// Refresh interval in minutes
    #[arg(short, long, global = true)]
    pub step: Option<u32>,

    /// Minutes added or removed per +/- key
    #[arg(short, long, global = true)]
    pub delta: Option<u32>,

    /// Sound played when time is up
    #[arg(long, global = true)]
    pub sound: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the resolved config path and effective values
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from(["stint", "-t", "00:30:00", "--delta", "5", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
        assert_eq!(cli.overrides.total.as_deref(), Some("00:30:00"));
        assert_eq!(cli.overrides.delta, Some(5));
        assert_eq!(cli.overrides.step, None);
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["stint", "init", "--force", "-c", "/tmp/s.yaml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.yaml")));
    }

    #[test]
    fn test_rejects_negative_step() {
        assert!(Cli::try_parse_from(["stint", "--step", "-1"]).is_err());
    }
}
