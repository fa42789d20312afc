//! Application state definitions
//!
//! The session is the authoritative record of rehearsal progress; the rest
//! is fixed context (profile, canned inventory) the screens display.

use crate::config::SimulationConfig;
use crate::hardware::{DiskInfo, HardwareInfo};
use crate::session::InstallSession;

/// Main application state.
///
/// Owned by the UI thread. The worker never touches it directly; it only
/// sends `ProgressEvent`s, which the event loop applies to the session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current rehearsal session
    pub session: InstallSession,
    /// Profile being rehearsed
    pub config: SimulationConfig,
    /// Canned hardware inventory
    pub hardware: HardwareInfo,
    /// Canned disk inventory
    pub disks: Vec<DiskInfo>,
}

impl AppState {
    /// Create the initial state for a profile
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            session: InstallSession::new(),
            config,
            hardware: HardwareInfo::probe(),
            disks: crate::hardware::detect_disks(),
        }
    }
}
