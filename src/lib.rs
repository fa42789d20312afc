//! archsim library
//!
//! Core functionality for the Arch Linux installation rehearsal: the phase
//! table, the session state machine, the worker, and the TUI.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hardware;
pub mod phase;
pub mod session;
pub mod simulator;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppState};
pub use config::SimulationConfig;
pub use error::ArchSimError;
pub use hardware::{DiskInfo, FirmwareMode, HardwareInfo};
pub use phase::InstallPhase;
pub use session::{InstallSession, PhaseTransitionError, LOG_CAPACITY};
pub use simulator::{Pacing, ProgressEvent, SimulatorHandle, SimulatorOptions};
pub use types::{Filesystem, InstallType};
