//! UI rendering module
//!
//! Rendering is a pure function of the application state: the renderer
//! reads the session snapshot and draws, never mutating anything.
//!
//! # Module Structure
//! - `header` - ASCII art header, titles, progress bar, log panel
//! - `screens` - per-phase screens (idle, running, complete, failed)

mod header;
mod screens;

pub use header::HeaderRenderer;

use crate::app::AppState;
use ratatui::Frame;

/// Top-level UI renderer
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the screen appropriate for the current session phase
    pub fn render(&self, f: &mut Frame, state: &AppState) {
        screens::render(f, state, &self.header);
    }
}
