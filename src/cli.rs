use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// archsim - rehearse an Arch Linux installation in the terminal
#[derive(Parser)]
#[command(name = "archsim")]
#[command(about = "A terminal-based rehearsal of the Arch Linux installation flow")]
#[command(version)]
pub struct Cli {
    /// Speed multiplier for simulated delays (1.0 = real pacing, 0 = instant).
    ///
    /// Overrides the `speed` field of the configuration file.
    #[arg(long, global = true)]
    pub speed: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive TUI rehearsal (default)
    Run {
        /// Path to a rehearsal profile to use
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run headless, printing progress lines to stdout
    Simulate {
        /// Path to a rehearsal profile to use
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a rehearsal profile file
    Validate {
        /// Path to the profile file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to TUI mode)
        let result = Cli::try_parse_from(["archsim"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(cli.command.is_none());
        assert!(cli.speed.is_none());
    }

    #[test]
    fn test_cli_run_with_config() {
        let result = Cli::try_parse_from(["archsim", "run", "--config", "/path/to/profile.json"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        match cli.command {
            Some(Commands::Run { config }) => {
                assert_eq!(config.unwrap().to_str().unwrap(), "/path/to/profile.json");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_simulate_with_speed() {
        let result = Cli::try_parse_from(["archsim", "simulate", "--speed", "0"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert_eq!(cli.speed, Some(0.0));
        assert!(matches!(cli.command, Some(Commands::Simulate { .. })));
    }

    #[test]
    fn test_cli_validate_command() {
        let result = Cli::try_parse_from(["archsim", "validate", "/path/to/profile.json"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        match cli.command {
            Some(Commands::Validate { config }) => {
                assert_eq!(config.to_str().unwrap(), "/path/to/profile.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_speed() {
        let result = Cli::try_parse_from(["archsim", "run", "--speed", "fast"]);
        assert!(result.is_err());
    }
}
