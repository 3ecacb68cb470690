//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Move Resampler - replay and tune drag move-event resampling
#[derive(Parser, Debug)]
#[command(name = "move-resample")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded trace through the resampler
    Replay {
        /// Input trace file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Write the full replay report (JSON) here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Simulated refresh rate, overrides the config
        #[arg(short, long)]
        refresh_hz: Option<f64>,
    },

    /// Print a summary of a trace
    Inspect {
        /// Input trace file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the default location
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the default config path
    Path,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_replay_with_defaults() {
        let args = vec!["move-resample", "replay", "--input", "drag.json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Replay {
                input,
                output,
                refresh_hz,
            } => {
                assert_eq!(input, PathBuf::from("drag.json"));
                assert!(output.is_none());
                assert!(refresh_hz.is_none());
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_cli_parse_replay_with_all_options() {
        let args = vec![
            "move-resample",
            "replay",
            "--input", "/traces/drag.json",
            "--output", "/reports/drag.json",
            "--refresh-hz", "90",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Replay {
                input,
                output,
                refresh_hz,
            } => {
                assert_eq!(input, PathBuf::from("/traces/drag.json"));
                assert_eq!(output, Some(PathBuf::from("/reports/drag.json")));
                assert_eq!(refresh_hz, Some(90.0));
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_cli_replay_requires_input() {
        let result = Cli::try_parse_from(vec!["move-resample", "replay"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::try_parse_from(vec!["move-resample", "inspect", "-i", "t.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }

    #[test]
    fn test_cli_parse_config_actions() {
        let cli = Cli::try_parse_from(vec!["move-resample", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));

        let cli = Cli::try_parse_from(vec!["move-resample", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config {
                action: ConfigAction::Init { force },
            } => assert!(force),
            _ => panic!("Expected Config Init command"),
        }

        let cli = Cli::try_parse_from(vec!["move-resample", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn test_cli_global_flags() {
        let args = vec![
            "move-resample",
            "inspect",
            "--input", "t.json",
            "--verbose",
            "--config", "/etc/move.toml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/move.toml")));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
