//! Application module
//!
//! Owns the main event loop: render at a fixed cadence, drain worker
//! events, and translate the two-button control surface (Enter/Esc) into
//! session operations.

mod state;

pub use state::AppState;

use crate::config::SimulationConfig;
use crate::error::{ArchSimError, Result};
use crate::phase::InstallPhase;
use crate::simulator::{self, Pacing, ProgressEvent, SimulatorHandle, SimulatorOptions};
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// UI refresh and input poll cadence
const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Receiving end of the worker's event channel while a run is active
    events: Option<Receiver<ProgressEvent>>,
    /// Handle to the worker thread while a run is active
    worker: Option<SimulatorHandle>,
}

impl App {
    /// Create a new application instance for a profile
    pub fn new(config: SimulationConfig) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::new(config),
            ui_renderer: UiRenderer::new(),
            events: None,
            worker: None,
        }
    }

    /// Read-only view of the application state (for tests)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main application loop
    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.drain_events()?;

            terminal.draw(|f| self.ui_renderer.render(f, &self.state))?;

            if crossterm::event::poll(TICK_RATE)? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if self.handle_key_event(key_event)? {
                        break; // Exit requested
                    }
                }
            }
        }

        // Tear the worker down before the terminal is restored
        self.worker = None;
        self.events = None;
        Ok(())
    }

    /// Apply all pending worker events to the session
    fn drain_events(&mut self) -> Result<()> {
        let mut batch = Vec::new();
        let mut disconnected = false;

        if let Some(rx) = &self.events {
            loop {
                match rx.try_recv() {
                    Ok(event) => batch.push(event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        for event in &batch {
            if let Err(err) = self.state.session.apply(event) {
                // The worker emits events in order, so this is an internal bug
                warn!("out-of-order worker event: {}", err);
                return Err(err.into());
            }
        }

        if disconnected {
            self.events = None;
        }
        if self.state.session.phase().is_terminal() {
            // Worker has exited; drop the handle so the thread is joined
            self.worker = None;
        }

        Ok(())
    }

    /// Handle a key event. Returns true when the app should exit.
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(true)
            }
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Enter => self.on_confirm()?,
            KeyCode::Esc => return self.on_back(),
            _ => {}
        }

        Ok(false)
    }

    /// Confirm button: start a run from Idle, resume while paused
    fn on_confirm(&mut self) -> Result<()> {
        if self.state.session.phase() == InstallPhase::Idle && !self.state.session.is_running() {
            self.start_run()?;
        } else if self.state.session.is_paused() {
            self.set_paused(false);
        }
        Ok(())
    }

    /// Back button: pause while running, reset from a terminal state,
    /// quit from Idle. Returns true when the app should exit.
    fn on_back(&mut self) -> Result<bool> {
        let session = &self.state.session;
        if session.is_running() {
            let paused = !session.is_paused();
            self.set_paused(paused);
            Ok(false)
        } else if session.phase().is_terminal() {
            debug!("resetting session to Idle");
            self.state.session.reset();
            self.worker = None;
            self.events = None;
            Ok(false)
        } else {
            Ok(true)
        }
    }

    fn set_paused(&mut self, paused: bool) {
        if self.state.session.is_paused() != paused {
            self.state.session.toggle_pause();
        }
        if let Some(worker) = &self.worker {
            worker.set_paused(paused);
        }
        debug!(paused, "pause flag updated");
    }

    /// Spawn the worker and mark the session as running
    fn start_run(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let options = SimulatorOptions {
            pacing: Pacing::scaled(self.state.config.speed),
            fail_at: None,
        };

        let handle = simulator::spawn(options, tx)
            .map_err(|e| ArchSimError::state(format!("failed to spawn worker: {}", e)))?;

        self.state.session.start().map_err(ArchSimError::from)?;
        self.events = Some(rx);
        self.worker = Some(handle);
        info!("rehearsal started");
        Ok(())
    }
}
