//! archsim - Main entry point
//!
//! A terminal-based rehearsal of the Arch Linux installation flow. Walks the
//! full phase sequence with realistic status text and pacing; never touches
//! a disk, a package database, or the network.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::Path;
use std::sync::mpsc;
use tracing::{debug, error, info};

use archsim::app::App;
use archsim::cli::{Cli, Commands};
use archsim::config::SimulationConfig;
use archsim::session::InstallSession;
use archsim::simulator::{self, Pacing, ProgressEvent, SimulatorOptions};

/// Initialize tracing with env-filter overrides (RUST_LOG).
///
/// Logs go to stderr so TUI output on stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("archsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("archsim starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Some(Commands::Validate { config }) => {
            info!("Validating profile file: {:?}", config);
            match SimulationConfig::load_from_file(&config) {
                Ok(profile) => match profile.validate() {
                    Ok(_) => {
                        info!("Profile validation successful");
                        println!("✓ Profile file is valid: {:?}", config);
                    }
                    Err(e) => {
                        error!("Profile validation failed: {}", e);
                        eprintln!("✗ Profile validation failed: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load profile file: {}", e);
                    eprintln!("✗ Failed to load profile file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Simulate { config }) => {
            let profile = load_profile(config.as_deref(), cli.speed)?;
            run_headless(profile)?;
        }
        Some(Commands::Run { config }) => {
            let profile = load_profile(config.as_deref(), cli.speed)?;
            run_tui(profile)?;
        }
        None => {
            info!("No command specified, launching TUI rehearsal");
            let profile = load_profile(None, cli.speed)?;
            run_tui(profile)?;
        }
    }

    Ok(())
}

/// Load a profile (or the defaults), validate it, and apply the CLI
/// speed override.
fn load_profile(
    path: Option<&Path>,
    speed: Option<f64>,
) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let mut profile = match path {
        Some(path) => {
            info!("Loading profile from: {:?}", path);
            SimulationConfig::load_from_file(path)?
        }
        None => SimulationConfig::default(),
    };

    if let Some(speed) = speed {
        profile.speed = speed;
    }
    profile.validate()?;

    Ok(profile)
}

/// Run the interactive TUI rehearsal
fn run_tui(profile: SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(profile);
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if the app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result.map_err(Into::into)
}

/// Run the rehearsal headless, printing progress lines to stdout
fn run_headless(profile: SimulationConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Arch Linux installation rehearsal (headless)");
    println!("Profile: {} on {}", profile.install_type, profile.install_disk);
    println!();

    let (tx, rx) = mpsc::channel();
    let options = SimulatorOptions {
        pacing: Pacing::scaled(profile.speed),
        fail_at: None,
    };

    let mut session = InstallSession::new();
    session.start()?;
    let handle = simulator::spawn(options, tx)?;

    // The channel closes when the worker exits
    for event in rx {
        session.apply(&event)?;
        match &event {
            ProgressEvent::PhaseStarted { .. } => {
                println!("==> {}", session.status());
            }
            ProgressEvent::StepCompleted { .. } => {
                println!("    [{:>3}%] {}", session.progress(), session.status());
            }
            ProgressEvent::PhaseCompleted { .. } => {}
            ProgressEvent::RunCompleted => {
                println!();
                println!("✓ {} (no disks were written)", session.status());
            }
            ProgressEvent::RunFailed { .. } => {
                eprintln!("✗ {}", session.status());
            }
        }
    }
    handle.join();

    if session.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}
